use rhai::{Dynamic, Scope};

/// Name of the top-level binding a script assigns its return value to.
pub const RESULT_BINDING: &str = "result";

/// Finds the script's return value among its top-level bindings.
///
/// The first `predeclared` entries of `scope` are the injected inputs and are
/// skipped: an input that happens to be named `result` is not a return value
/// unless the script declares `result` itself. When the script declares it
/// more than once, the latest declaration wins.
///
/// Only bindings still in scope when the script ends are seen. A `let result`
/// inside a block (`if`, loop body, `{ ... }`) is dropped with the block, so
/// scripts declare `result` at top level and assign it inside blocks.
pub fn extract_result(scope: &Scope<'_>, predeclared: usize) -> Option<Dynamic> {
    scope
        .iter_raw()
        .skip(predeclared)
        .filter(|(name, _, _)| *name == RESULT_BINDING)
        .last()
        .map(|(_, _, value)| value.clone())
}
