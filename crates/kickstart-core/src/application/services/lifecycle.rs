//! Lifecycle dispatch.
//!
//! An [`Attachment`] opts into phases by returning `Some` from the matching
//! `as_*` accessor. The dispatcher walks the attachments in insertion order
//! and calls each one that supports the phase; the rest are skipped.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{application::services::host::Host, domain::Phase, error::KickstartResult};

/// `hooks` capability.
pub trait OnHooks {
    fn hooks(&mut self, host: &mut Host) -> KickstartResult<()>;
}

/// `run` capability.
pub trait OnRun {
    fn run(&mut self, host: &mut Host) -> KickstartResult<()>;
}

/// `deactivate` capability.
pub trait OnDeactivate {
    fn deactivate(&mut self, host: &mut Host) -> KickstartResult<()>;
}

/// An object attached to the application.
pub trait Attachment: Send {
    /// Display name, usually the class identifier it was registered under.
    fn name(&self) -> &str;

    fn as_hooks(&mut self) -> Option<&mut dyn OnHooks> {
        None
    }

    fn as_run(&mut self) -> Option<&mut dyn OnRun> {
        None
    }

    fn as_deactivate(&mut self) -> Option<&mut dyn OnDeactivate> {
        None
    }
}

/// Phases `attachment` opts into.
pub fn supported_phases(attachment: &mut dyn Attachment) -> Vec<Phase> {
    Phase::ALL
        .into_iter()
        .filter(|phase| match phase {
            Phase::Hooks => attachment.as_hooks().is_some(),
            Phase::Run => attachment.as_run().is_some(),
            Phase::Deactivate => attachment.as_deactivate().is_some(),
        })
        .collect()
}

/// An attachment whose handler returned an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchFailure {
    pub attachment: String,
    pub reason: String,
}

/// Result of one broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub phase: Phase,
    pub invoked: Vec<String>,
    pub skipped: Vec<String>,
    pub failures: Vec<DispatchFailure>,
}

impl DispatchReport {
    fn new(phase: Phase) -> Self {
        Self {
            phase,
            invoked: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct LifecycleDispatcher;

impl LifecycleDispatcher {
    /// Broadcast `phase` to every attachment that supports it.
    ///
    /// A failing handler is logged and recorded; the broadcast carries on
    /// with the next attachment.
    #[instrument(skip(attachments, host), fields(phase = %phase, attachments = attachments.len()))]
    pub fn dispatch(
        attachments: &mut [Box<dyn Attachment>],
        phase: Phase,
        host: &mut Host,
    ) -> DispatchReport {
        let mut report = DispatchReport::new(phase);

        for attachment in attachments.iter_mut() {
            let name = attachment.name().to_owned();

            let result = match phase {
                Phase::Hooks => attachment.as_hooks().map(|a| a.hooks(host)),
                Phase::Run => attachment.as_run().map(|a| a.run(host)),
                Phase::Deactivate => attachment.as_deactivate().map(|a| a.deactivate(host)),
            };

            match result {
                None => report.skipped.push(name),
                Some(Ok(())) => {
                    debug!(attachment = %name, "Invoked");
                    report.invoked.push(name);
                }
                Some(Err(e)) => {
                    warn!(attachment = %name, error = %e, "Phase handler failed");
                    report.invoked.push(name.clone());
                    report.failures.push(DispatchFailure {
                        attachment: name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<String>>>;

    struct Probe {
        name: &'static str,
        hooks: bool,
        run: bool,
        fail_run: bool,
        calls: Calls,
    }

    impl Probe {
        fn new(name: &'static str, hooks: bool, run: bool, calls: &Calls) -> Self {
            Self {
                name,
                hooks,
                run,
                fail_run: false,
                calls: Arc::clone(calls),
            }
        }
    }

    impl OnHooks for Probe {
        fn hooks(&mut self, _host: &mut Host) -> KickstartResult<()> {
            self.calls.lock().unwrap().push(format!("{}:hooks", self.name));
            Ok(())
        }
    }

    impl OnRun for Probe {
        fn run(&mut self, _host: &mut Host) -> KickstartResult<()> {
            self.calls.lock().unwrap().push(format!("{}:run", self.name));
            if self.fail_run {
                return Err(ApplicationError::AttachmentFailed {
                    attachment: self.name.into(),
                    phase: "run".into(),
                    reason: "boom".into(),
                }
                .into());
            }
            Ok(())
        }
    }

    impl Attachment for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn as_hooks(&mut self) -> Option<&mut dyn OnHooks> {
            if self.hooks { Some(self) } else { None }
        }

        fn as_run(&mut self) -> Option<&mut dyn OnRun> {
            if self.run { Some(self) } else { None }
        }
    }

    fn calls(c: &Calls) -> Vec<String> {
        c.lock().unwrap().clone()
    }

    #[test]
    fn invokes_only_supporting_attachments_in_order() {
        let log = Calls::default();
        let mut attachments: Vec<Box<dyn Attachment>> = vec![
            Box::new(Probe::new("a", true, false, &log)),
            Box::new(Probe::new("b", false, true, &log)),
            Box::new(Probe::new("c", true, true, &log)),
        ];
        let mut host = Host::new();

        let report = LifecycleDispatcher::dispatch(&mut attachments, Phase::Hooks, &mut host);

        assert_eq!(calls(&log), ["a:hooks", "c:hooks"]);
        assert_eq!(report.invoked, ["a", "c"]);
        assert_eq!(report.skipped, ["b"]);
        assert!(report.is_clean());
    }

    #[test]
    fn attachment_without_capabilities_is_never_invoked() {
        let log = Calls::default();
        let mut attachments: Vec<Box<dyn Attachment>> =
            vec![Box::new(Probe::new("inert", false, false, &log))];
        let mut host = Host::new();

        for phase in Phase::ALL {
            let report = LifecycleDispatcher::dispatch(&mut attachments, phase, &mut host);
            assert!(report.invoked.is_empty());
            assert!(report.is_clean());
        }
        assert!(calls(&log).is_empty());
    }

    #[test]
    fn failure_does_not_stop_broadcast() {
        let log = Calls::default();
        let mut failing = Probe::new("bad", false, true, &log);
        failing.fail_run = true;
        let mut attachments: Vec<Box<dyn Attachment>> = vec![
            Box::new(failing),
            Box::new(Probe::new("good", false, true, &log)),
        ];
        let mut host = Host::new();

        let report = LifecycleDispatcher::dispatch(&mut attachments, Phase::Run, &mut host);

        assert_eq!(calls(&log), ["bad:run", "good:run"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].attachment, "bad");
    }

    #[test]
    fn reports_supported_phases() {
        let log = Calls::default();
        let mut probe = Probe::new("p", true, false, &log);
        assert_eq!(supported_phases(&mut probe), [Phase::Hooks]);
    }
}
