//! Notifier shim use case
//!
//! Registers an application with the notification daemon and forwards
//! notifications to it over a [`NotificationBus`].

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

use crate::domain::notification::NotifyOptions;
use crate::domain::registration::RegistrationInfo;
use crate::domain::session::{NotRegistered, ShimSession, ShimState, Signal};
use crate::domain::wire::{
    channels, clicked_context, BusMessage, NotificationPayload, RegistrationPayload,
};

use super::ports::{BusError, NotificationBus, SignalHandler};

/// Source of the current process id, read on every publish
pub type PidSource = Arc<dyn Fn() -> u32 + Send + Sync>;

/// Errors from the notifier shim
#[derive(Debug, Error)]
pub enum ShimError {
    #[error("Notification bus error: {0}")]
    Bus(#[from] BusError),

    #[error(transparent)]
    NotRegistered(#[from] NotRegistered),

    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Registration and dispatch front-end for a Growl-style daemon.
///
/// Share it behind an `Arc` to call `notify` while another task drives
/// [`listen`](Self::listen).
pub struct NotifierShim<B, H>
where
    B: NotificationBus,
    H: SignalHandler,
{
    bus: B,
    handler: H,
    session: Mutex<ShimSession>,
    pid: PidSource,
}

impl<B, H> NotifierShim<B, H>
where
    B: NotificationBus,
    H: SignalHandler,
{
    /// Create an unregistered shim
    pub fn new(bus: B, handler: H) -> Self {
        Self {
            bus,
            handler,
            session: Mutex::new(ShimSession::new()),
            pid: Arc::new(std::process::id),
        }
    }

    /// Replace the process id source
    pub fn with_pid_source(mut self, pid: impl Fn() -> u32 + Send + Sync + 'static) -> Self {
        self.pid = Arc::new(pid);
        self
    }

    #[cfg(test)]
    fn bus(&self) -> &B {
        &self.bus
    }

    pub async fn state(&self) -> ShimState {
        self.session.lock().await.state()
    }

    /// Channels currently subscribed on the bus
    #[cfg(test)]
    async fn subscribed_channels(&self) -> Vec<String> {
        self.session.lock().await.subscriptions().channels()
    }

    /// Register the application with the daemon.
    ///
    /// Subscribes to the daemon-ready signal and to this process's clicked /
    /// timed-out channels, then posts the registration payload. Calling it
    /// again replaces the registration and republishes it.
    pub async fn register(&self, info: RegistrationInfo) -> Result<(), ShimError> {
        let mut session = self.session.lock().await;
        let pid = self.current_pid();

        let desired = vec![
            (channels::DAEMON_READY.to_string(), Signal::DaemonReady),
            (channels::clicked_channel(info.app_name(), pid), Signal::Clicked),
            (channels::timed_out_channel(info.app_name(), pid), Signal::TimedOut),
        ];

        // The table follows each bus call; the registration is only committed
        // once the daemon has been sent the payload.
        let plan = session.subscriptions().plan(&desired);
        if !plan.is_empty() {
            tracing::debug!(
                subscribe = plan.subscribe.len(),
                unsubscribe = plan.unsubscribe.len(),
                "updating subscriptions"
            );
        }
        for channel in plan.unsubscribe {
            self.bus.unsubscribe(&channel).await?;
            session.subscriptions_mut().remove(&channel);
        }
        for (channel, signal) in plan.subscribe {
            self.bus.subscribe(&channel).await?;
            tracing::debug!(%channel, %signal, "subscribed");
            session.subscriptions_mut().insert(channel, signal);
        }

        self.publish_registration(&info).await?;
        session.register(info);
        Ok(())
    }

    /// Post a notification.
    ///
    /// `name` should be one of the registered notification names. This is not
    /// checked here; the daemon decides what to do with unknown names.
    pub async fn notify(
        &self,
        name: &str,
        title: &str,
        description: &str,
        options: NotifyOptions,
    ) -> Result<(), ShimError> {
        let session = self.session.lock().await;
        let info = session.registration("notify")?;

        if !info.contains(name) {
            tracing::debug!(name, app = info.app_name(), "notification name is not in the registered catalog");
        }

        let payload = NotificationPayload::build(
            name,
            title,
            description,
            options,
            info.app_name(),
            self.current_pid(),
        );
        let message = BusMessage::encode(channels::NEW_NOTIFICATION, &payload)?;
        self.bus.post(message).await?;

        tracing::debug!(name, priority = payload.priority, "notification posted");
        Ok(())
    }

    /// Handle one inbound bus message.
    ///
    /// Returns the signal it was routed to, or `None` for channels this shim
    /// does not observe.
    pub async fn dispatch(&self, message: &BusMessage) -> Result<Option<Signal>, ShimError> {
        let session = self.session.lock().await;
        let Some(signal) = session.subscriptions().route(&message.name) else {
            tracing::trace!(name = %message.name, "ignoring unrouted message");
            return Ok(None);
        };

        match signal {
            Signal::DaemonReady => {
                if let Ok(info) = session.registration("re-register") {
                    tracing::info!(app = info.app_name(), "daemon ready, re-registering");
                    self.publish_registration(info).await?;
                }
            }
            Signal::Clicked => {
                drop(session);
                self.handler.on_clicked(clicked_context(&message.info));
            }
            Signal::TimedOut => {
                drop(session);
                self.handler.on_timed_out(clicked_context(&message.info));
            }
        }

        Ok(Some(signal))
    }

    /// Dispatch inbound messages until the stream closes.
    ///
    /// Bus errors while re-registering end the loop and are returned.
    pub async fn listen(&self, mut inbound: mpsc::UnboundedReceiver<BusMessage>) -> Result<(), ShimError> {
        while let Some(message) = inbound.recv().await {
            self.dispatch(&message).await?;
        }
        tracing::debug!("inbound bus stream closed");
        Ok(())
    }

    /// Unsubscribe every channel and return to the unregistered state
    pub async fn shutdown(&self) -> Result<(), ShimError> {
        let mut session = self.session.lock().await;
        tracing::debug!(channels = session.subscriptions().len(), "shutting down shim");
        for channel in session.reset() {
            self.bus.unsubscribe(&channel).await?;
        }
        Ok(())
    }

    fn current_pid(&self) -> u32 {
        (self.pid)()
    }

    async fn publish_registration(&self, info: &RegistrationInfo) -> Result<(), ShimError> {
        let payload = RegistrationPayload::from(info);
        let message = BusMessage::encode(channels::APPLICATION_REGISTRATION, &payload)?;
        self.bus.post(message).await?;

        tracing::info!(
            app = info.app_name(),
            notifications = info.notifications().len(),
            "registration posted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::application::ports::ShimEvent;
    use crate::domain::notification::{Icon, Priority};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Post(BusMessage),
        Subscribe(String),
        Unsubscribe(String),
    }

    // Records every bus call in order
    #[derive(Default)]
    struct MockBus {
        calls: StdMutex<Vec<Call>>,
        fail_posts: AtomicBool,
        fail_subscribes: AtomicBool,
    }

    impl MockBus {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn posts(&self) -> Vec<BusMessage> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Post(m) => Some(m),
                    _ => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl NotificationBus for MockBus {
        async fn post(&self, message: BusMessage) -> Result<(), BusError> {
            if self.fail_posts.load(Ordering::SeqCst) {
                return Err(BusError::SendFailed("bus down".to_string()));
            }
            self.calls.lock().unwrap().push(Call::Post(message));
            Ok(())
        }

        async fn subscribe(&self, channel: &str) -> Result<(), BusError> {
            if self.fail_subscribes.load(Ordering::SeqCst) {
                return Err(BusError::SendFailed("bus down".to_string()));
            }
            self.calls.lock().unwrap().push(Call::Subscribe(channel.to_string()));
            Ok(())
        }

        async fn unsubscribe(&self, channel: &str) -> Result<(), BusError> {
            self.calls.lock().unwrap().push(Call::Unsubscribe(channel.to_string()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockHandler {
        events: StdMutex<Vec<ShimEvent>>,
    }

    impl SignalHandler for MockHandler {
        fn on_clicked(&self, context: Option<Value>) {
            self.events.lock().unwrap().push(ShimEvent::Clicked(context));
        }

        fn on_timed_out(&self, context: Option<Value>) {
            self.events.lock().unwrap().push(ShimEvent::TimedOut(context));
        }
    }

    fn shim() -> NotifierShim<MockBus, MockHandler> {
        NotifierShim::new(MockBus::default(), MockHandler::default()).with_pid_source(|| 4242)
    }

    fn last_post(shim: &NotifierShim<MockBus, MockHandler>) -> BusMessage {
        shim.bus().posts().pop().expect("no message posted")
    }

    #[tokio::test]
    async fn register_subscribes_then_posts_registration() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();

        let calls = shim.bus().calls();
        assert_eq!(calls.len(), 4);
        assert!(calls[..3].iter().all(|c| matches!(c, Call::Subscribe(_))));
        assert!(calls.contains(&Call::Subscribe(channels::DAEMON_READY.to_string())));
        assert!(calls.contains(&Call::Subscribe("Demo-4242-GrowlClicked!".to_string())));
        assert!(calls.contains(&Call::Subscribe("Demo-4242-GrowlTimedOut!".to_string())));

        let message = last_post(&shim);
        assert_eq!(message.name, channels::APPLICATION_REGISTRATION);
        assert_eq!(message.info["AllNotifications"], json!(["Ping"]));
        assert_eq!(message.info["DefaultNotifications"], json!(["Ping"]));
        assert_eq!(shim.state().await, ShimState::Registered);
    }

    #[tokio::test]
    async fn register_with_explicit_defaults() {
        let shim = shim();
        let info = RegistrationInfo::new("Demo", ["Ping", "Pong"]).with_defaults(["Ping"]);
        shim.register(info).await.unwrap();

        let message = last_post(&shim);
        assert_eq!(message.info["AllNotifications"], json!(["Ping", "Pong"]));
        assert_eq!(message.info["DefaultNotifications"], json!(["Ping"]));
    }

    #[tokio::test]
    async fn register_twice_does_not_duplicate_subscriptions() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();

        let subscribes = shim
            .bus()
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::Subscribe(_)))
            .count();
        assert_eq!(subscribes, 3);
        assert_eq!(shim.bus().posts().len(), 2);
    }

    #[tokio::test]
    async fn register_with_new_name_moves_scoped_channels() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();
        shim.register(RegistrationInfo::new("Other", ["Ping"])).await.unwrap();

        let calls = shim.bus().calls();
        assert!(calls.contains(&Call::Unsubscribe("Demo-4242-GrowlClicked!".to_string())));
        assert!(calls.contains(&Call::Unsubscribe("Demo-4242-GrowlTimedOut!".to_string())));
        assert!(!calls.contains(&Call::Unsubscribe(channels::DAEMON_READY.to_string())));

        let channels = shim.subscribed_channels().await;
        assert!(channels.contains(&"Other-4242-GrowlClicked!".to_string()));
        assert!(!channels.contains(&"Demo-4242-GrowlClicked!".to_string()));
    }

    #[tokio::test]
    async fn notify_before_register_fails() {
        let shim = shim();
        let err = shim
            .notify("Ping", "Hi", "desc", NotifyOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ShimError::NotRegistered(_)));
        assert!(shim.bus().calls().is_empty());
    }

    #[tokio::test]
    async fn notify_default_payload() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();
        shim.notify("Ping", "Hi", "desc", NotifyOptions::new()).await.unwrap();

        let message = last_post(&shim);
        assert_eq!(message.name, channels::NEW_NOTIFICATION);
        assert_eq!(message.info["NotificationName"], "Ping");
        assert_eq!(message.info["NotificationPriority"], 0);
        assert_eq!(message.info["ApplicationName"], "Demo");
        assert_eq!(message.info["ApplicationPID"], 4242);
        assert!(message.info.get("NotificationSticky").is_none());
        assert!(message.info.get("NotificationClickContext").is_none());
    }

    #[tokio::test]
    async fn notify_with_options() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();

        let options = NotifyOptions::new()
            .priority(Priority::High)
            .sticky(true)
            .click_context("abc")
            .icon(Icon::new(vec![1]));
        shim.notify("Ping", "Hi", "desc", options).await.unwrap();

        let message = last_post(&shim);
        assert_eq!(message.info["NotificationPriority"], 1);
        assert_eq!(message.info["NotificationSticky"], 1);
        assert_eq!(
            message.info["NotificationClickContext"],
            json!({ "user_click_context": "abc" })
        );
        assert_eq!(message.info["NotificationIcon"], "AQ==");
    }

    #[tokio::test]
    async fn notify_accepts_unregistered_name() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();
        shim.notify("Unknown", "Hi", "desc", NotifyOptions::new()).await.unwrap();

        assert_eq!(last_post(&shim).info["NotificationName"], "Unknown");
    }

    #[tokio::test]
    async fn notify_reads_pid_at_publish_time() {
        let pid = Arc::new(AtomicU32::new(100));
        let source = Arc::clone(&pid);
        let shim = NotifierShim::new(MockBus::default(), MockHandler::default())
            .with_pid_source(move || source.load(Ordering::SeqCst));

        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();
        pid.store(200, Ordering::SeqCst);
        shim.notify("Ping", "Hi", "desc", NotifyOptions::new()).await.unwrap();

        assert_eq!(last_post(&shim).info["ApplicationPID"], 200);
    }

    #[tokio::test]
    async fn daemon_ready_republishes_identical_registration() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping", "Pong"]).with_defaults(["Pong"]))
            .await
            .unwrap();
        let first = last_post(&shim);

        let signal = shim
            .dispatch(&BusMessage::signal(channels::DAEMON_READY))
            .await
            .unwrap();

        assert_eq!(signal, Some(Signal::DaemonReady));
        assert_eq!(shim.bus().posts(), vec![first.clone(), first]);
    }

    #[tokio::test]
    async fn daemon_ready_before_register_is_ignored() {
        let shim = shim();
        let signal = shim
            .dispatch(&BusMessage::signal(channels::DAEMON_READY))
            .await
            .unwrap();

        assert_eq!(signal, None);
        assert!(shim.bus().posts().is_empty());
    }

    #[tokio::test]
    async fn clicked_signal_reaches_handler_with_context() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();

        let message = BusMessage::new(
            "Demo-4242-GrowlClicked!",
            json!({ "ClickedContext": { "user_click_context": "abc" } }),
        );
        let signal = shim.dispatch(&message).await.unwrap();

        assert_eq!(signal, Some(Signal::Clicked));
        assert_eq!(
            *shim.handler.events.lock().unwrap(),
            vec![ShimEvent::Clicked(Some(json!("abc")))]
        );
    }

    #[tokio::test]
    async fn timed_out_signal_without_payload() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();

        shim.dispatch(&BusMessage::signal("Demo-4242-GrowlTimedOut!"))
            .await
            .unwrap();

        assert_eq!(
            *shim.handler.events.lock().unwrap(),
            vec![ShimEvent::TimedOut(None)]
        );
    }

    #[tokio::test]
    async fn other_process_signals_are_ignored() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();

        let signal = shim
            .dispatch(&BusMessage::signal("Demo-1-GrowlClicked!"))
            .await
            .unwrap();

        assert_eq!(signal, None);
        assert!(shim.handler.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn listen_dispatches_until_closed() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(BusMessage::signal("Demo-4242-GrowlClicked!")).unwrap();
        tx.send(BusMessage::signal("Demo-4242-GrowlTimedOut!")).unwrap();
        drop(tx);

        shim.listen(rx).await.unwrap();
        assert_eq!(shim.handler.events.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn shutdown_unsubscribes_everything() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();
        shim.shutdown().await.unwrap();

        let unsubscribes = shim
            .bus()
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::Unsubscribe(_)))
            .count();
        assert_eq!(unsubscribes, 3);
        assert!(shim.subscribed_channels().await.is_empty());
        assert_eq!(shim.state().await, ShimState::Unregistered);
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let bus = MockBus {
            fail_posts: AtomicBool::new(true),
            ..Default::default()
        };
        let shim = NotifierShim::new(bus, MockHandler::default());

        let err = shim
            .register(RegistrationInfo::new("Demo", ["Ping"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ShimError::Bus(BusError::SendFailed(_))));
        assert_eq!(shim.state().await, ShimState::Unregistered);
        // Subscriptions that did reach the bus are still tracked for shutdown
        assert_eq!(shim.subscribed_channels().await.len(), 3);
    }

    #[tokio::test]
    async fn failed_subscribe_leaves_shim_unregistered() {
        let bus = MockBus {
            fail_subscribes: AtomicBool::new(true),
            ..Default::default()
        };
        let shim = NotifierShim::new(bus, MockHandler::default());

        let err = shim
            .register(RegistrationInfo::new("Demo", ["Ping"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ShimError::Bus(_)));
        assert_eq!(shim.state().await, ShimState::Unregistered);
        assert!(shim.subscribed_channels().await.is_empty());

        let err = shim
            .notify("Ping", "Hi", "desc", NotifyOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ShimError::NotRegistered(_)));
        assert!(shim.bus().posts().is_empty());
    }

    #[tokio::test]
    async fn failed_reregister_keeps_previous_registration() {
        let shim = shim();
        shim.register(RegistrationInfo::new("Demo", ["Ping"])).await.unwrap();

        shim.bus().fail_posts.store(true, Ordering::SeqCst);
        assert!(shim
            .register(RegistrationInfo::new("Other", ["Ping"]))
            .await
            .is_err());
        shim.bus().fail_posts.store(false, Ordering::SeqCst);

        // The daemon never heard of "Other"; keep notifying as "Demo"
        assert_eq!(shim.state().await, ShimState::Registered);
        shim.notify("Ping", "Hi", "desc", NotifyOptions::new()).await.unwrap();
        assert_eq!(last_post(&shim).info["ApplicationName"], "Demo");
    }
}
