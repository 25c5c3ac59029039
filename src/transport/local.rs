//! Lokaler Modus: prozessinterne Kernel-Bindung mit Polling.

use super::{KernelCall, Transport, TransportError, TransportMode};
use crate::core::{UpdateMsg, UserId};
use std::task::{Context, Poll};
use std::thread;
use std::time::Duration;

/// Leere Abfragen in Folge, bevor zwischen zwei Abfragen geschlafen wird.
const SPIN_POLLS: u32 = 16;
/// Obergrenze der Pause zwischen zwei leeren Abfragen.
const MAX_IDLE_WAIT: Duration = Duration::from_millis(16);

/// Prozessinterne Kernel-Bindung.
///
/// `call` führt einen Aufruf synchron aus; dessen Ergebnisse erscheinen erst
/// beim nächsten `get_updates` für dieselbe Datei.
pub trait Kernel {
    fn call(&mut self, user: &UserId, call: &KernelCall) -> anyhow::Result<()>;

    fn get_updates(&mut self, file: &str) -> anyhow::Result<Vec<UpdateMsg>>;
}

/// Transport über eine lokale `Kernel`-Bindung.
pub struct LocalTransport<K: Kernel> {
    kernel: K,
    user: UserId,
    idle_polls: u32,
}

impl<K: Kernel> LocalTransport<K> {
    pub fn new(kernel: K, user: UserId) -> Self {
        Self {
            kernel,
            user,
            idle_polls: 0,
        }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut K {
        &mut self.kernel
    }
}

impl<K: Kernel> Transport for LocalTransport<K> {
    fn mode(&self) -> TransportMode {
        TransportMode::Local
    }

    fn send(&mut self, call: &KernelCall) -> Result<(), TransportError> {
        log::debug!("lokal → {}", call.func_name());
        self.idle_polls = 0;
        self.kernel
            .call(&self.user, call)
            .map_err(|e| TransportError::Kernel(format!("{}: {:#}", call.func_name(), e)))
    }

    fn poll_updates(
        &mut self,
        file: &str,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Vec<UpdateMsg>, TransportError>> {
        match self.try_updates(file) {
            Ok(updates) if updates.is_empty() => {
                // Kein Push-Kanal: erneut einplanen, solange die Datei offen ist.
                // Nach einigen leeren Runden blockiert jede Runde kurz den Thread.
                self.idle_polls = self.idle_polls.saturating_add(1);
                let wait = idle_wait(self.idle_polls);
                if !wait.is_zero() {
                    thread::sleep(wait);
                }
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Ok(updates) => {
                self.idle_polls = 0;
                Poll::Ready(Ok(updates))
            }
            Err(e) => Poll::Ready(Err(e)),
        }
    }

    fn try_updates(&mut self, file: &str) -> Result<Vec<UpdateMsg>, TransportError> {
        self.kernel
            .get_updates(file)
            .map_err(|e| TransportError::Kernel(format!("get_updates: {:#}", e)))
    }
}

/// Pause vor der nächsten Abfrage nach `idle_polls` leeren Runden in Folge.
fn idle_wait(idle_polls: u32) -> Duration {
    match idle_polls.checked_sub(SPIN_POLLS) {
        None | Some(0) => Duration::ZERO,
        Some(n) => Duration::from_millis(u64::from(n)).min(MAX_IDLE_WAIT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::task::noop_waker_ref;

    #[derive(Default)]
    struct QueueKernel {
        files: Vec<String>,
        queue: Vec<UpdateMsg>,
        fail: bool,
    }

    impl Kernel for QueueKernel {
        fn call(&mut self, _user: &UserId, call: &KernelCall) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("Kernel nicht bereit");
            }
            self.files.push(call.file().to_string());
            self.queue.push(UpdateMsg::Delete {
                key: crate::core::ObjectId::new(),
            });
            Ok(())
        }

        fn get_updates(&mut self, _file: &str) -> anyhow::Result<Vec<UpdateMsg>> {
            Ok(std::mem::take(&mut self.queue))
        }
    }

    #[test]
    fn test_poll_returns_pending_until_kernel_has_output() {
        let mut transport = LocalTransport::new(QueueKernel::default(), UserId::new());
        let mut cx = Context::from_waker(noop_waker_ref());
        assert!(transport.poll_updates("a.flx", &mut cx).is_pending());

        transport
            .send(&KernelCall::SaveFile {
                file: "a.flx".into(),
            })
            .expect("senden");
        match transport.poll_updates("a.flx", &mut cx) {
            Poll::Ready(Ok(batch)) => assert_eq!(batch.len(), 1),
            other => panic!("Unerwartetes Ergebnis: {other:?}"),
        }
        assert_eq!(transport.kernel().files, vec!["a.flx".to_string()]);
    }

    #[test]
    fn test_idle_wait_grows_after_spin_phase_and_is_capped() {
        assert_eq!(idle_wait(1), Duration::ZERO);
        assert_eq!(idle_wait(SPIN_POLLS), Duration::ZERO);
        assert_eq!(idle_wait(SPIN_POLLS + 3), Duration::from_millis(3));
        assert_eq!(idle_wait(u32::MAX), MAX_IDLE_WAIT);
    }

    #[test]
    fn test_send_and_output_reset_idle_counter() {
        let mut transport = LocalTransport::new(QueueKernel::default(), UserId::new());
        let mut cx = Context::from_waker(noop_waker_ref());
        for _ in 0..3 {
            assert!(transport.poll_updates("a.flx", &mut cx).is_pending());
        }
        assert_eq!(transport.idle_polls, 3);

        transport
            .send(&KernelCall::SaveFile {
                file: "a.flx".into(),
            })
            .expect("senden");
        assert_eq!(transport.idle_polls, 0);

        assert!(transport.poll_updates("a.flx", &mut cx).is_ready());
        assert_eq!(transport.idle_polls, 0);
        assert!(transport.try_updates("a.flx").expect("leer").is_empty());
        assert_eq!(transport.idle_polls, 0);
    }

    #[test]
    fn test_kernel_failure_maps_to_transport_error() {
        let kernel = QueueKernel {
            fail: true,
            ..Default::default()
        };
        let mut transport = LocalTransport::new(kernel, UserId::new());
        let err = transport
            .send(&KernelCall::UndoLatest {
                file: "a.flx".into(),
            })
            .expect_err("Aufruf sollte scheitern");
        assert!(matches!(err, TransportError::Kernel(msg) if msg.starts_with("undo_latest")));
        assert_eq!(transport.mode(), TransportMode::Local);
    }
}
