use std::sync::Arc;
use std::time::Instant;

use rhai::default_limits::MAX_STRINGS_INTERNED;
use rhai::packages::{Package, StandardPackage};
use rhai::{Dynamic, Engine};

use crate::config::EvalConfig;
use crate::sink::PrintSink;

/// Payload carried by the engine when the wall-clock budget runs out.
#[derive(Debug, Clone)]
pub(crate) struct TimeBudgetExceeded {
    pub(crate) ms: u64,
}

/// Builds a fresh engine for one execution. Looping and recursion are
/// requested explicitly; recursion depth is bounded by `max_call_levels`.
///
/// The engine starts raw: only the standard package is registered and no
/// module resolver is installed, so `import` cannot reach the filesystem.
/// `input_bindings` is added to the variable limit so injected inputs do not
/// use up the script's own budget.
pub(crate) fn build_engine(
    config: &EvalConfig,
    sink: Arc<dyn PrintSink>,
    input_bindings: usize,
) -> Engine {
    let mut engine = Engine::new_raw();
    engine.register_global_module(StandardPackage::new().as_shared_module());

    engine.set_max_strings_interned(MAX_STRINGS_INTERNED);
    engine.set_strict_variables(true);
    engine.set_fail_on_invalid_map_property(true);
    engine.set_allow_looping(true);

    engine.set_max_operations(config.max_operations);
    engine.set_max_call_levels(config.max_call_levels);
    engine.set_max_expr_depths(config.max_expr_depth, config.max_function_expr_depth);
    engine.set_max_string_size(config.max_string_size);
    engine.set_max_array_size(config.max_array_size);
    engine.set_max_map_size(config.max_map_size);
    engine.set_max_variables(config.max_variables.saturating_add(input_bindings));
    engine.set_max_functions(config.max_functions);
    engine.set_max_modules(config.max_modules);

    let print_label = config.label.clone();
    let print_sink = Arc::clone(&sink);
    engine.on_print(move |text| print_sink.print(&print_label, text));

    let debug_label = config.label.clone();
    engine.on_debug(move |text, source, position| {
        sink.debug(&debug_label, text, source, position.line());
    });

    if let Some(timeout) = config.timeout() {
        let start = Instant::now();
        let ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        engine.on_progress(move |_| {
            if start.elapsed() > timeout {
                Some(Dynamic::from(TimeBudgetExceeded { ms }))
            } else {
                None
            }
        });
    }

    engine
}
