//! C-ABI boundary for the trellis engine.
//!
//! Graph handles are opaque pointers; all functions return 0 on success and
//! a small operation-specific non-zero code on failure, with
//! [`trellis_last_error`] carrying the message. Strings returned by pointer
//! live in a thread-local buffer that stays valid until the next
//! string-returning call on the same thread — callers must copy to retain.
//! The string view points into graph-owned storage valid until the next run
//! or destroy of that graph.
//!
//! A graph handle must not be used from two threads at once; independent
//! handles may run concurrently. `trellis_graph_run` blocks on a lazily
//! created process-wide worker pool.

use std::cell::RefCell;
use std::ffi::{CStr, CString, c_char, c_double, c_int};
use std::sync::OnceLock;
use tokio::runtime::Runtime;
use trellis_core::error::TrellisError;
use trellis_core::graph::Graph;
use trellis_core::types::NodeId;
use trellis_core::value::{Value, ValueType};
use trellis_executor::executor::{Executor, ExecutorConfig};
use trellis_nodes::standard_registry;

/// Type tag for number outputs.
pub const TRELLIS_TYPE_NUMBER: c_int = 0;
/// Type tag for string outputs.
pub const TRELLIS_TYPE_STRING: c_int = 1;
/// Type tag for boolean outputs.
pub const TRELLIS_TYPE_BOOL: c_int = 2;

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
    static STRING_RETURN: RefCell<CString> = RefCell::new(CString::default());
}

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .thread_name("trellis-worker")
            .build()
            .expect("worker pool should build on first use")
    })
}

fn set_last_error(message: &str) {
    let owned = CString::new(message.replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = owned);
}

fn fail(code: c_int, message: &str) -> c_int {
    set_last_error(message);
    code
}

fn string_return(value: &str) -> *const c_char {
    let owned = CString::new(value.replace('\0', " ")).unwrap_or_default();
    STRING_RETURN.with(|slot| {
        *slot.borrow_mut() = owned;
        slot.borrow().as_ptr()
    })
}

fn type_tag(value_type: ValueType) -> c_int {
    match value_type {
        ValueType::Number => TRELLIS_TYPE_NUMBER,
        ValueType::String => TRELLIS_TYPE_STRING,
        ValueType::Bool => TRELLIS_TYPE_BOOL,
    }
}

unsafe fn c_str_input<'a>(input: *const c_char) -> Option<&'a str> {
    if input.is_null() {
        return None;
    }
    // SAFETY: caller guarantees `input` points to a valid NUL-terminated string.
    unsafe { CStr::from_ptr(input) }.to_str().ok()
}

// ── Graph lifecycle ──

/// Create an empty graph bound to the standard node-type registry.
/// Returns null only on allocation failure.
#[unsafe(no_mangle)]
pub extern "C" fn trellis_graph_create() -> *mut Graph {
    Box::into_raw(Box::new(Graph::new(standard_registry())))
}

/// Destroy a graph handle. Null is ignored.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_destroy(graph: *mut Graph) {
    if graph.is_null() {
        return;
    }
    // SAFETY: `graph` originates from `trellis_graph_create`.
    drop(unsafe { Box::from_raw(graph) });
}

// ── Construction ──

/// Register a node under a caller-chosen id. `label` may be null.
/// Codes: 1 null/invalid args, 2 duplicate id, 3 unknown type.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_add_node_with_id(
    graph: *mut Graph,
    node_id: c_int,
    type_name: *const c_char,
    label: *const c_char,
) -> c_int {
    let Some(graph) = (unsafe { graph.as_mut() }) else {
        return fail(1, "add_node: null graph");
    };
    let Some(type_name) = (unsafe { c_str_input(type_name) }) else {
        return fail(1, "add_node: null or non-UTF-8 type name");
    };
    let label = unsafe { c_str_input(label) };

    match graph.add_node(NodeId::new(node_id), type_name, label) {
        Ok(()) => 0,
        Err(e @ TrellisError::DuplicateNode { .. }) => fail(2, &e.to_string()),
        Err(e) => fail(3, &e.to_string()),
    }
}

/// Set a number parameter. Codes: 1 null args, 2 unknown node.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_set_param_number(
    graph: *mut Graph,
    node_id: c_int,
    key: *const c_char,
    value: c_double,
) -> c_int {
    unsafe { set_param(graph, node_id, key, Value::number(value), "set_param_number") }
}

/// Set a string parameter. Codes: 1 null args, 2 unknown node.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_set_param_string(
    graph: *mut Graph,
    node_id: c_int,
    key: *const c_char,
    value: *const c_char,
) -> c_int {
    let Some(value) = (unsafe { c_str_input(value) }) else {
        return fail(1, "set_param_string: null or non-UTF-8 value");
    };
    unsafe { set_param(graph, node_id, key, Value::string(value), "set_param_string") }
}

/// Set a boolean parameter (zero = false). Codes: 1 null args, 2 unknown node.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_set_param_bool(
    graph: *mut Graph,
    node_id: c_int,
    key: *const c_char,
    value: c_int,
) -> c_int {
    unsafe { set_param(graph, node_id, key, Value::bool(value != 0), "set_param_bool") }
}

unsafe fn set_param(
    graph: *mut Graph,
    node_id: c_int,
    key: *const c_char,
    value: Value,
    op: &str,
) -> c_int {
    let Some(graph) = (unsafe { graph.as_mut() }) else {
        return fail(1, &format!("{op}: null graph"));
    };
    let Some(key) = (unsafe { c_str_input(key) }) else {
        return fail(1, &format!("{op}: null or non-UTF-8 key"));
    };
    match graph.set_param(NodeId::new(node_id), key, value) {
        Ok(()) => 0,
        Err(e) => fail(2, &e.to_string()),
    }
}

/// Append a data edge. Codes: 1 null graph, 2 unknown node, 3 source output
/// out of range, 4 target input out of range, 5 socket type mismatch.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_connect(
    graph: *mut Graph,
    from_node: c_int,
    from_output_idx: c_int,
    to_node: c_int,
    to_input_idx: c_int,
) -> c_int {
    let Some(graph) = (unsafe { graph.as_mut() }) else {
        return fail(1, "connect: null graph");
    };
    if from_output_idx < 0 {
        return fail(3, "connect: from_out out of range");
    }
    if to_input_idx < 0 {
        return fail(4, "connect: to_in out of range");
    }
    match graph.connect(
        NodeId::new(from_node),
        from_output_idx as usize,
        NodeId::new(to_node),
        to_input_idx as usize,
    ) {
        Ok(()) => 0,
        Err(e @ TrellisError::UnknownNode { .. }) => fail(2, &e.to_string()),
        Err(e @ TrellisError::OutputPortOutOfRange { .. }) => fail(3, &e.to_string()),
        Err(e @ TrellisError::InputPortOutOfRange { .. }) => fail(4, &e.to_string()),
        Err(e) => fail(5, &e.to_string()),
    }
}

/// Append an output pin. Codes: 1 null graph, 2 unknown node, 3 output
/// index out of range.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_add_output(
    graph: *mut Graph,
    node_id: c_int,
    out_index: c_int,
) -> c_int {
    let Some(graph) = (unsafe { graph.as_mut() }) else {
        return fail(1, "add_output: null graph");
    };
    if out_index < 0 {
        return fail(3, "add_output: out_index out of range");
    }
    match graph.add_output(NodeId::new(node_id), out_index as usize) {
        Ok(()) => 0,
        Err(e @ TrellisError::UnknownNode { .. }) => fail(2, &e.to_string()),
        Err(e) => fail(3, &e.to_string()),
    }
}

// ── Execution ──

/// Run the graph to completion. Codes: 1 null graph, 2 run failed (cycle,
/// dangling edge, or compute error — see `trellis_last_error`).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_run(graph: *mut Graph) -> c_int {
    let Some(graph) = (unsafe { graph.as_mut() }) else {
        return fail(1, "run: null graph");
    };
    let executor = Executor::new(ExecutorConfig::from_env_or_default());
    match runtime().block_on(executor.execute(graph)) {
        Ok(()) => 0,
        Err(e) => fail(2, &e.to_string()),
    }
}

// ── Output reads ──

/// Number of registered output pins; 0 with `last_error` set on a null
/// handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_get_output_count(graph: *mut Graph) -> c_int {
    let Some(graph) = (unsafe { graph.as_ref() }) else {
        set_last_error("get_output_count: null graph");
        return 0;
    };
    graph.output_count() as c_int
}

/// Declared type tag of an output pin, or -1 with `last_error` set.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_get_output_type(
    graph: *mut Graph,
    index: c_int,
) -> c_int {
    let Some(graph) = (unsafe { graph.as_ref() }) else {
        set_last_error("get_output_type: null graph");
        return -1;
    };
    if index < 0 {
        set_last_error("get_output_type: index out of range");
        return -1;
    }
    match graph.output_type(index as usize) {
        Ok(value_type) => type_tag(value_type),
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

/// Read a number output into `out`. Codes: 1 null args, 2 index out of
/// range, 3 not computed, 4 type mismatch.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_get_output_number(
    graph: *mut Graph,
    index: c_int,
    out: *mut c_double,
) -> c_int {
    let Some(graph) = (unsafe { graph.as_ref() }) else {
        return fail(1, "get_output_number: null graph");
    };
    if out.is_null() {
        return fail(1, "get_output_number: null out pointer");
    }
    if index < 0 {
        return fail(2, "get_output_number: index out of range");
    }
    match graph.output_number(index as usize) {
        Ok(value) => {
            // SAFETY: `out` was checked non-null; caller guarantees validity.
            unsafe { *out = value };
            0
        }
        Err(e) => fail(output_read_code(&e), &e.to_string()),
    }
}

/// Read a boolean output into `out` (0 or 1). Codes as for numbers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_get_output_bool(
    graph: *mut Graph,
    index: c_int,
    out: *mut c_int,
) -> c_int {
    let Some(graph) = (unsafe { graph.as_ref() }) else {
        return fail(1, "get_output_bool: null graph");
    };
    if out.is_null() {
        return fail(1, "get_output_bool: null out pointer");
    }
    if index < 0 {
        return fail(2, "get_output_bool: index out of range");
    }
    match graph.output_bool(index as usize) {
        Ok(value) => {
            // SAFETY: `out` was checked non-null; caller guarantees validity.
            unsafe { *out = c_int::from(value) };
            0
        }
        Err(e) => fail(output_read_code(&e), &e.to_string()),
    }
}

/// Read a string output. Returns null with `last_error` set on failure; the
/// pointer lives in the thread-local return buffer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_get_output_string(
    graph: *mut Graph,
    index: c_int,
) -> *const c_char {
    let Some(graph) = (unsafe { graph.as_ref() }) else {
        set_last_error("get_output_string: null graph");
        return std::ptr::null();
    };
    if index < 0 {
        set_last_error("get_output_string: index out of range");
        return std::ptr::null();
    }
    match graph.output_string(index as usize) {
        Ok(value) => string_return(value),
        Err(e) => {
            set_last_error(&e.to_string());
            std::ptr::null()
        }
    }
}

/// Borrow a string output without copying: writes the byte pointer and
/// length of the graph-owned value, valid until the graph's next run or
/// destroy. The bytes are UTF-8 and not NUL-terminated. Codes as for
/// numbers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_graph_get_output_string_view(
    graph: *mut Graph,
    index: c_int,
    out_ptr: *mut *const c_char,
    out_len: *mut usize,
) -> c_int {
    let Some(graph) = (unsafe { graph.as_ref() }) else {
        return fail(1, "get_output_string_view: null graph");
    };
    if out_ptr.is_null() || out_len.is_null() {
        return fail(1, "get_output_string_view: null out pointer");
    }
    if index < 0 {
        return fail(2, "get_output_string_view: index out of range");
    }
    match graph.output_string(index as usize) {
        Ok(value) => {
            // SAFETY: out pointers were checked non-null above.
            unsafe {
                *out_ptr = value.as_ptr().cast::<c_char>();
                *out_len = value.len();
            }
            0
        }
        Err(e) => fail(output_read_code(&e), &e.to_string()),
    }
}

fn output_read_code(error: &TrellisError) -> c_int {
    match error {
        TrellisError::PinOutOfRange { .. } => 2,
        TrellisError::NotComputed { .. } => 3,
        TrellisError::OutputTypeMismatch { .. } => 4,
        _ => 5,
    }
}

// ── Introspection ──

/// JSON array of all registered type names, sorted.
#[unsafe(no_mangle)]
pub extern "C" fn trellis_list_types() -> *const c_char {
    match serde_json::to_string(&standard_registry().type_names()) {
        Ok(json) => string_return(&json),
        Err(e) => {
            set_last_error(&format!("list_types: {e}"));
            std::ptr::null()
        }
    }
}

/// JSON signature of a registered type: name, version, description, typed
/// inputs and outputs, parameter specs with defaults and enums. Returns
/// null with `last_error` set for unknown names.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn trellis_describe_type(type_name: *const c_char) -> *const c_char {
    let Some(type_name) = (unsafe { c_str_input(type_name) }) else {
        set_last_error("describe_type: null or non-UTF-8 type name");
        return std::ptr::null();
    };
    let Some(signature) = standard_registry().describe(type_name) else {
        set_last_error(&format!("describe_type: unknown type '{type_name}'"));
        return std::ptr::null();
    };
    match serde_json::to_string(&signature) {
        Ok(json) => string_return(&json),
        Err(e) => {
            set_last_error(&format!("describe_type: {e}"));
            std::ptr::null()
        }
    }
}

// ── Errors ──

/// The last error message observed on this thread. Never null; empty before
/// the first failure. A successful call does not clear it. The pointer
/// stays valid until the next failing boundary call on the same thread.
#[unsafe(no_mangle)]
pub extern "C" fn trellis_last_error() -> *const c_char {
    LAST_ERROR.with(|slot| slot.borrow().as_ptr())
}
