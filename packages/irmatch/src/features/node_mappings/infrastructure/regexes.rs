//! Default regex building blocks
//!
//! Ideal graph dump lines look like
//! `  12  StoreI  === 5 7 10 11  [[ 13 ]]  @Foo+12 *, name=i, ...`.
//! Every ideal default regex is `START + <node name> + MID [+ suffix] + END`.
//! Opto assembly regexes are written out in full below.

pub use crate::features::node_mappings::domain::IS_REPLACED;

pub const START: &str = r"(\d+(\s){2}(";
pub const MID: &str = r".*)+(\s){2}===.*";
pub const END: &str = ")";

/// Field type of a `*_OF_CLASS` access, terminating the pattern
pub const OF_CLASS_POSTFIX: &str = r"(:|\+)\S* \*)";

/// Plain ideal node, e.g. `ideal("StoreI")`
pub fn ideal(node: &str) -> String {
    format!("{START}{node}{MID}{END}")
}

/// Ideal node whose dump line must also contain `suffix`
pub fn ideal_with(node: &str, suffix: &str) -> String {
    format!("{START}{node}{MID}{suffix}{END}")
}

/// Memory access to a user supplied class
pub fn of_class(node: &str) -> String {
    format!(r"{START}{node}{MID}@\S*{IS_REPLACED}{OF_CLASS_POSTFIX}")
}

/// Memory access to a user supplied field name
pub fn of_field(node: &str) -> String {
    ideal_with(node, &format!("@.*name={IS_REPLACED},.*"))
}

/// Call node targeting a user supplied method
pub fn call_of_method(node: &str) -> String {
    ideal_with(node, &format!("{IS_REPLACED} "))
}

/// Uncommon trap with the given deoptimization reason
pub fn trap(reason: &str) -> String {
    ideal_with("CallStaticJava", &format!("uncommon_trap.*{reason}"))
}

// ═══════════════════════════════════════════════════════════════════════════
// PrintOptoAssembly
// ═══════════════════════════════════════════════════════════════════════════

// Lines between the klass load and the runtime call that may be skipped
const ALLOC_FILLER: &str = r"((.*(?i:mov|mv|xorl|nop|spill).*|\s*)\r?\n)*";
const ALLOC_ARRAY_FILLER: &str = r"((.*(?i:mov|mv|xor|nop|spill).*|\s*)\r?\n)*";

pub fn opto_alloc() -> String {
    format!(r"(.*precise .*\r?\n{ALLOC_FILLER}.*(?i:call,static).*wrapper for: _new_instance_Java{END}")
}

pub fn opto_alloc_of() -> String {
    format!(
        r"(.*precise .*{IS_REPLACED}:.*\r?\n{ALLOC_FILLER}.*(?i:call,static).*wrapper for: _new_instance_Java{END}"
    )
}

pub fn opto_alloc_array() -> String {
    format!(r"(.*precise \[.*\r?\n{ALLOC_ARRAY_FILLER}.*(?i:call,static).*wrapper for: _new_array_Java{END}")
}

pub fn opto_alloc_array_of() -> String {
    format!(
        r"(.*precise \[.*{IS_REPLACED}:.*\r?\n{ALLOC_ARRAY_FILLER}.*(?i:call,static).*wrapper for: _new_array_Java{END}"
    )
}

pub fn opto_checkcast_array() -> String {
    format!(r"(((?i:cmp|CLFI|CLR).*precise \[.*:|.*(?i:mov|or).*precise \[.*:.*\r?\n.*(cmp|CMP|CLR)){END}")
}

pub fn opto_checkcast_array_of() -> String {
    format!(
        r"(((?i:cmp|CLFI|CLR).*precise \[.*{IS_REPLACED}:|.*(?i:mov|or).*precise \[.*{IS_REPLACED}:.*\r?\n.*(cmp|CMP|CLR)){END}"
    )
}

pub fn opto_checkcast_arraycopy() -> String {
    format!(
        r"(.*((?i:call_leaf_nofp,runtime)|CALL,\s?runtime leaf nofp|BCTRL.*.leaf call).*checkcast_arraycopy.*{END}"
    )
}

pub fn opto_field_access() -> String {
    format!("(.*Field: *{END}")
}

pub fn opto_scope_object() -> String {
    format!("(.*# ScObj.*{END}")
}
