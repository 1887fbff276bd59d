//! Event router: handler registration and per-event dispatch.
//!
//! A [`Router`] is assembled once through [`RouterBuilder`] and can then
//! dispatch any number of events. Each dispatch gets its own deadline.

use crate::dispatch::{
    CustomResolver, DEFAULT_TIMEOUT, Deadline, ExecutionMode, Executor, ResolutionMode, Resolver,
};
use crate::error::{Error, Result};
use crate::handler::{
    Handler, HandlerAdapter, NotificationHandler, PostToolUseHandler, PreCompactHandler,
    PreToolUseHandler, SessionStartHandler, StopHandler, SubagentStopHandler,
    UserPromptSubmitHandler, adapt_notification, adapt_post_tool_use, adapt_pre_compact,
    adapt_pre_tool_use, adapt_session_start, adapt_stop, adapt_subagent_stop,
    adapt_user_prompt_submit,
};
use crate::hooks::{self, EventName, ExitDisposition, HookInput, HookOutput};
use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, debug_span, info};

/// Assembles a [`Router`].
///
/// Registering an event a second time replaces its handler list.
pub struct RouterBuilder {
    handlers: HashMap<EventName, Vec<Arc<dyn Handler>>>,
    execution: ExecutionMode,
    resolver: Arc<dyn Resolver>,
    timeout: Duration,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            execution: ExecutionMode::default(),
            resolver: ResolutionMode::default().resolver(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RouterBuilder {
    /// Builder with sequential execution, block-wins resolution and the
    /// default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder registering `adapter` for every event it handles.
    #[must_use]
    pub fn from_adapter(adapter: HandlerAdapter) -> Self {
        let events = adapter.events();
        let shared: Arc<dyn Handler> = Arc::new(adapter);
        events.into_iter().fold(Self::new(), |builder, name| {
            builder.on(name, [Arc::clone(&shared)])
        })
    }

    /// Register uniform handlers for `name`, replacing any earlier list.
    #[must_use]
    pub fn on<I>(mut self, name: EventName, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Handler>>,
    {
        self.handlers.insert(name, handlers.into_iter().collect());
        self
    }

    #[must_use]
    pub fn on_pre_tool_use<I>(self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn PreToolUseHandler>>,
    {
        self.on(
            EventName::PreToolUse,
            handlers.into_iter().map(adapt_pre_tool_use),
        )
    }

    #[must_use]
    pub fn on_post_tool_use<I>(self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn PostToolUseHandler>>,
    {
        self.on(
            EventName::PostToolUse,
            handlers.into_iter().map(adapt_post_tool_use),
        )
    }

    #[must_use]
    pub fn on_notification<I>(self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn NotificationHandler>>,
    {
        self.on(
            EventName::Notification,
            handlers.into_iter().map(adapt_notification),
        )
    }

    #[must_use]
    pub fn on_user_prompt_submit<I>(self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn UserPromptSubmitHandler>>,
    {
        self.on(
            EventName::UserPromptSubmit,
            handlers.into_iter().map(adapt_user_prompt_submit),
        )
    }

    #[must_use]
    pub fn on_stop<I>(self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn StopHandler>>,
    {
        self.on(EventName::Stop, handlers.into_iter().map(adapt_stop))
    }

    #[must_use]
    pub fn on_subagent_stop<I>(self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn SubagentStopHandler>>,
    {
        self.on(
            EventName::SubagentStop,
            handlers.into_iter().map(adapt_subagent_stop),
        )
    }

    #[must_use]
    pub fn on_pre_compact<I>(self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn PreCompactHandler>>,
    {
        self.on(
            EventName::PreCompact,
            handlers.into_iter().map(adapt_pre_compact),
        )
    }

    #[must_use]
    pub fn on_session_start<I>(self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn SessionStartHandler>>,
    {
        self.on(
            EventName::SessionStart,
            handlers.into_iter().map(adapt_session_start),
        )
    }

    #[must_use]
    pub fn execution(mut self, mode: ExecutionMode) -> Self {
        self.execution = mode;
        self
    }

    #[must_use]
    pub fn resolution(mut self, mode: ResolutionMode) -> Self {
        self.resolver = mode.resolver();
        self
    }

    /// Use a caller-supplied resolution strategy.
    #[must_use]
    pub fn custom_resolver(mut self, resolver: CustomResolver) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Deadline applied to each dispatch's execution phase.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// # Errors
    ///
    /// Returns `EmptyRegistration` if an event was registered with no
    /// handlers, and `Config` for a zero timeout.
    pub fn build(self) -> Result<Router> {
        if let Some(name) = EventName::ALL
            .into_iter()
            .find(|name| self.handlers.get(name).is_some_and(Vec::is_empty))
        {
            return Err(Error::EmptyRegistration(name));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }

        Ok(Router {
            handlers: self.handlers,
            execution: self.execution,
            executor: self.execution.executor(),
            resolver: self.resolver,
            timeout: self.timeout,
        })
    }
}

/// Dispatches decoded events to their registered handlers.
pub struct Router {
    handlers: HashMap<EventName, Vec<Arc<dyn Handler>>>,
    execution: ExecutionMode,
    executor: Arc<dyn Executor>,
    resolver: Arc<dyn Resolver>,
    timeout: Duration,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<_> = self
            .handlers
            .iter()
            .map(|(name, list)| (*name, list.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("Router")
            .field("handlers", &counts)
            .field("execution", &self.execution)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Router {
    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Number of handlers registered for `name`.
    #[must_use]
    pub fn handler_count(&self, name: EventName) -> usize {
        self.handlers.get(&name).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn execution(&self) -> ExecutionMode {
        self.execution
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the handlers registered for `name` and resolve their results.
    ///
    /// With no handlers registered the decision is a plain success.
    ///
    /// # Errors
    ///
    /// Execution errors (handler failure in sequential modes, deadline
    /// expiry) are returned without resolving. Otherwise the resolver's
    /// error, if any.
    pub fn handle_event(&self, input: HookInput, name: EventName) -> Result<HookOutput> {
        let Some(handlers) = self.handlers.get(&name).filter(|h| !h.is_empty()) else {
            debug!(event = %name, "no handlers registered");
            return Ok(HookOutput::success());
        };

        let _span = debug_span!("dispatch", event = %name, session = input.session_id())
            .entered();
        let deadline = Deadline::after(self.timeout);
        let input = Arc::new(input);

        let results = self.executor.execute(handlers, &input, name, deadline)?;
        debug!(results = results.len(), "execution finished");

        let output = self.resolver.resolve(results)?;
        if output.is_blocking() {
            info!(
                event = %name,
                reason = output.stop_reason().unwrap_or_default(),
                "event blocked"
            );
        }
        Ok(output)
    }

    /// Decode a raw payload and dispatch it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEvent` or `MalformedInput` for a bad payload, else
    /// whatever [`Router::handle_event`] returns.
    pub fn process(&self, raw: &[u8]) -> Result<HookOutput> {
        let input = hooks::decode(raw)?;
        let name = input.event_name();
        self.handle_event(input, name)
    }

    /// Read one payload from `reader`, dispatch it and write the decision
    /// to `writer` as a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns I/O errors and anything [`Router::process`] returns. Nothing
    /// is written on error.
    pub fn run_with_io<R: Read, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<ExitDisposition> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;

        let output = self.process(&raw)?;
        let json = output.to_json()?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(output.disposition())
    }
}
