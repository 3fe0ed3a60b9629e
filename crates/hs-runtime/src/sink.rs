use std::sync::Mutex;

/// Receives the diagnostic output a script produces with `print` and `debug`.
///
/// One sink is shared by every execution of a runner, so implementations must
/// accept concurrent writes. Output never influences the evaluation result.
pub trait PrintSink: Send + Sync {
    fn print(&self, label: &str, text: &str);

    fn debug(&self, label: &str, text: &str, source: Option<&str>, line: Option<usize>) {
        let _ = (source, line);
        self.print(label, text);
    }
}

/// Forwards script output to `tracing` under the `hostscript::script` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl PrintSink for TracingSink {
    fn print(&self, label: &str, text: &str) {
        tracing::info!(target: "hostscript::script", label, "{}", text);
    }

    fn debug(&self, label: &str, text: &str, source: Option<&str>, line: Option<usize>) {
        tracing::debug!(target: "hostscript::script", label, source, line, "{}", text);
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct CapturingSink {
    lines: Mutex<Vec<String>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PrintSink for CapturingSink {
    fn print(&self, _label: &str, text: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(text.to_string());
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl PrintSink for DiscardSink {
    fn print(&self, _label: &str, _text: &str) {}
}

#[cfg(test)]
mod sink_tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn capturing_sink_routes_debug_through_print() {
        let sink = CapturingSink::new();
        sink.print("label", "one");
        sink.debug("label", "two", Some("script"), Some(3));
        assert_eq!(sink.lines(), vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn capturing_sink_accepts_concurrent_writers() {
        let sink = Arc::new(CapturingSink::new());
        let handles = (0..4)
            .map(|worker| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for line in 0..25 {
                        sink.print("label", &format!("{}-{}", worker, line));
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().expect("writer thread");
        }
        assert_eq!(sink.lines().len(), 100);
    }
}
