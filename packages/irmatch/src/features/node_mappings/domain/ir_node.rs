//! IR node placeholder strings
//!
//! A rule refers to a C2 node through a placeholder instead of a raw regex.
//! Standalone placeholders look like `_#STORE_I#_` and are replaced by a
//! phase-specific default regex. Composite placeholders look like
//! `_#C#STORE_I_OF_CLASS#_` and must be followed by a user string (class,
//! field or method name) that is spliced into the default regex.

const PREFIX: &str = "_#";
const COMPOSITE_PREFIX: &str = "_#C#";
const POSTFIX: &str = "#_";

macro_rules! ir_nodes {
    ($($name:ident),* $(,)?) => {
        $(pub const $name: &str = concat!("_#", stringify!($name), "#_");)*

        /// Every standalone placeholder
        pub const STANDALONE_NODES: &[&str] = &[$($name),*];
    };
}

macro_rules! composite_ir_nodes {
    ($($name:ident),* $(,)?) => {
        $(pub const $name: &str = concat!("_#C#", stringify!($name), "#_");)*

        /// Every composite placeholder
        pub const COMPOSITE_NODES: &[&str] = &[$($name),*];
    };
}

ir_nodes! {
    ABS_D, ABS_F, ABS_I, ABS_L,
    ADD, ADD_I, ADD_L, ADD_VD, ADD_VI,
    ALLOC, ALLOC_ARRAY,
    AND, AND_I, AND_L, AND_V, AND_V_MASK,
    CALL,
    CAST_II, CAST_LL,
    CHECKCAST_ARRAY, CHECKCAST_ARRAYCOPY,
    CLASS_CHECK_TRAP,
    CMOVE_I,
    CMP_I, CMP_L, CMP_U, CMP_U3, CMP_UL, CMP_UL3,
    COMPRESS_BITS, EXPAND_BITS,
    CONV_I2L, CONV_L2I,
    CON_I, CON_L,
    COUNTED_LOOP, COUNTED_LOOP_MAIN, LONG_COUNTED_LOOP, LOOP, OUTER_STRIP_MINED_LOOP,
    DIV, DIV_L, DIV_BY_ZERO_TRAP,
    FAST_LOCK, FAST_UNLOCK,
    FIELD_ACCESS,
    IF,
    INTRINSIC_OR_TYPE_CHECKED_INLINING_TRAP, INTRINSIC_TRAP,
    LOAD, LOAD_B, LOAD_D, LOAD_F, LOAD_I, LOAD_KLASS, LOAD_L, LOAD_N, LOAD_P, LOAD_S, LOAD_UB, LOAD_US,
    LOAD_VECTOR,
    LSHIFT, LSHIFT_I, LSHIFT_L,
    MAX_I, MAX_V, MIN_I, MIN_V,
    MEMBAR, MEMBAR_STORESTORE,
    MUL, MUL_F, MUL_I, MUL_L,
    NULL_ASSERT_TRAP, NULL_CHECK_TRAP,
    OR_V, OR_V_MASK,
    PHI,
    POPCOUNT_L,
    POPULATE_INDEX,
    PREDICATE_TRAP, RANGE_CHECK_TRAP,
    REVERSE_BYTES_V, REVERSE_I, REVERSE_L, REVERSE_V,
    ROUND_VD, ROUND_VF,
    RSHIFT, RSHIFT_I, RSHIFT_L, RSHIFT_VB, RSHIFT_VS,
    SAFEPOINT,
    SCOPE_OBJECT,
    SIGNUM_VD, SIGNUM_VF,
    STORE, STORE_B, STORE_C, STORE_D, STORE_F, STORE_I, STORE_L, STORE_N, STORE_P,
    STORE_VECTOR,
    SUB, SUB_D, SUB_F, SUB_I, SUB_L,
    TRAP,
    UDIV_I, UDIV_L, UDIV_MOD_I, UDIV_MOD_L, UMOD_I, UMOD_L,
    UNHANDLED_TRAP, UNSTABLE_IF_TRAP,
    URSHIFT, URSHIFT_I, URSHIFT_L,
    VECTOR_BLEND,
    VECTOR_CAST_B2X, VECTOR_CAST_D2X, VECTOR_CAST_F2X, VECTOR_CAST_I2X, VECTOR_CAST_L2X, VECTOR_CAST_S2X,
    VECTOR_REINTERPRET,
    VECTOR_UCAST_B2X, VECTOR_UCAST_I2X, VECTOR_UCAST_S2X,
    XOR_I, XOR_L, XOR_V, XOR_V_MASK,
}

composite_ir_nodes! {
    ALLOC_OF, ALLOC_ARRAY_OF,
    CALL_OF_METHOD, DYNAMIC_CALL_OF_METHOD, STATIC_CALL_OF_METHOD,
    CHECKCAST_ARRAY_OF,
    LOAD_OF_CLASS, LOAD_B_OF_CLASS, LOAD_D_OF_CLASS, LOAD_F_OF_CLASS, LOAD_I_OF_CLASS,
    LOAD_L_OF_CLASS, LOAD_N_OF_CLASS, LOAD_P_OF_CLASS, LOAD_S_OF_CLASS, LOAD_UB_OF_CLASS,
    LOAD_US_OF_CLASS,
    LOAD_OF_FIELD,
    STORE_OF_CLASS, STORE_B_OF_CLASS, STORE_C_OF_CLASS, STORE_D_OF_CLASS, STORE_F_OF_CLASS,
    STORE_I_OF_CLASS, STORE_L_OF_CLASS, STORE_N_OF_CLASS, STORE_P_OF_CLASS,
    STORE_OF_FIELD,
}

/// `_#NAME#_` or `_#C#NAME#_` with a non-empty name
pub fn is_placeholder(node: &str) -> bool {
    node.len() > PREFIX.len() + POSTFIX.len() && node.starts_with(PREFIX) && node.ends_with(POSTFIX)
}

pub fn is_composite(node: &str) -> bool {
    is_placeholder(node) && node.starts_with(COMPOSITE_PREFIX)
}

/// Bare node name (`STORE_I`) of a placeholder, the input itself otherwise
pub fn node_name(node: &str) -> &str {
    if !is_placeholder(node) {
        return node;
    }
    let prefix = if is_composite(node) { COMPOSITE_PREFIX } else { PREFIX };
    node.strip_prefix(prefix)
        .and_then(|n| n.strip_suffix(POSTFIX))
        .filter(|n| !n.is_empty())
        .unwrap_or(node)
}

/// The same node in the other placeholder flavour (standalone ↔ composite)
pub(crate) fn flipped_flavour(node: &str) -> Option<String> {
    if !is_placeholder(node) {
        return None;
    }
    let name = node_name(node);
    if is_composite(node) {
        Some(format!("{PREFIX}{name}{POSTFIX}"))
    } else {
        Some(format!("{COMPOSITE_PREFIX}{name}{POSTFIX}"))
    }
}
