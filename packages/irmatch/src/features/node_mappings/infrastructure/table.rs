//! Node Mapping Table
//!
//! Immutable lookup from placeholder string to [`NodeMapEntry`]. Built once
//! with [`NodeMappingTable::new`] and passed by reference to the rule builder.

use super::regexes::{self, ideal, ideal_with, of_class, of_field, call_of_method, trap};
use crate::errors::{FormatError, FormatErrorKind};
use crate::features::node_mappings::domain::{ir_node, NodeMapEntry, PhasePolicy};
use crate::shared::models::CompilePhase;
use std::collections::HashMap;

/// Placeholder → default regex mapping
#[derive(Debug, Clone)]
pub struct NodeMappingTable {
    entries: HashMap<&'static str, NodeMapEntry>,
}

impl NodeMappingTable {
    pub fn new() -> Self {
        let mut table = Self {
            entries: HashMap::new(),
        };
        table.register_memory_nodes();
        table.register_control_nodes();
        table.register_arithmetic_nodes();
        table.register_vector_nodes();
        table.register_allocation_nodes();
        table
    }

    pub fn get(&self, node: &str) -> Option<&NodeMapEntry> {
        self.entries.get(node)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.entries.contains_key(node)
    }

    pub fn is_composite(&self, node: &str) -> bool {
        self.get(node).is_some_and(NodeMapEntry::is_composite)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered placeholders, sorted
    pub fn nodes(&self) -> Vec<&'static str> {
        let mut nodes: Vec<_> = self.entries.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Default regex template of `node` on `phase`
    pub fn regex_for(&self, node: &str, phase: CompilePhase) -> Result<&str, FormatError> {
        let entry = self.lookup(node)?;
        entry
            .regex_for(phase)
            .ok_or_else(|| FormatError::no_regex_for_phase(node, phase))
    }

    /// Phase a DEFAULT rule on `node` is matched on
    pub fn default_phase(&self, node: &str) -> Result<CompilePhase, FormatError> {
        if !ir_node::is_placeholder(node) {
            return Err(FormatError::no_default_phase(node));
        }
        Ok(self.lookup(node)?.default_phase())
    }

    fn lookup(&self, node: &str) -> Result<&NodeMapEntry, FormatError> {
        if let Some(entry) = self.get(node) {
            return Ok(entry);
        }
        match ir_node::flipped_flavour(node) {
            Some(other) if self.contains(&other) => Err(FormatError::new(
                FormatErrorKind::CompositeMismatch,
                format!(
                    "IR node \"{}\" must be written as \"{}\"{}",
                    node,
                    other,
                    if ir_node::is_composite(&other) {
                        " followed by a user postfix string"
                    } else {
                        " without a user postfix string"
                    }
                ),
            )),
            _ => Err(FormatError::undefined_placeholder(node)),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Registration
    // ═══════════════════════════════════════════════════════════════════════

    fn register(&mut self, node: &'static str, entry: NodeMapEntry) {
        let previous = self.entries.insert(node, entry);
        debug_assert!(previous.is_none(), "{node} registered twice");
    }

    fn ideal_only(&mut self, node: &'static str, regex: String) {
        self.register(node, NodeMapEntry::new(PhasePolicy::IdealFixed, regex));
    }

    fn all_ideal(&mut self, node: &'static str, regex: String) {
        self.register(node, NodeMapEntry::new(PhasePolicy::AllIdeal, regex));
    }

    fn require_loops(&mut self, node: &'static str, regex: String) {
        self.register(node, NodeMapEntry::new(PhasePolicy::IdealWithLoops, regex));
    }

    fn counted_loops(&mut self, node: &'static str, regex: String) {
        self.register(node, NodeMapEntry::new(PhasePolicy::IdealWithCountedLoops, regex));
    }

    fn ranged(&mut self, node: &'static str, regex: String, from: CompilePhase, to: CompilePhase) {
        self.register(node, NodeMapEntry::new(PhasePolicy::Range { from, to }, regex));
    }

    fn opto_only(&mut self, node: &'static str, regex: String) {
        self.register(node, NodeMapEntry::new(PhasePolicy::OptoOnly, regex));
    }

    /// Allocations exist as nodes until macro expansion, afterwards only as
    /// runtime calls in the assembly
    fn alloc_node(&mut self, node: &'static str, ideal_regex: String, opto_regex: String) {
        self.register(
            node,
            NodeMapEntry::ideal_and_opto(
                CompilePhase::BeforeRemoveuseless,
                CompilePhase::PhaseidealloopIterations,
                ideal_regex,
                opto_regex,
            ),
        );
    }

    fn register_memory_nodes(&mut self) {
        const STORES: [(&str, &str); 9] = [
            (ir_node::STORE, "Store(B|C|S|I|L|F|D|P|N)"),
            (ir_node::STORE_B, "StoreB"),
            (ir_node::STORE_C, "StoreC"),
            (ir_node::STORE_D, "StoreD"),
            (ir_node::STORE_F, "StoreF"),
            (ir_node::STORE_I, "StoreI"),
            (ir_node::STORE_L, "StoreL"),
            (ir_node::STORE_N, "StoreN"),
            (ir_node::STORE_P, "StoreP"),
        ];
        const STORES_OF_CLASS: [(&str, &str); 9] = [
            (ir_node::STORE_OF_CLASS, "Store(B|C|S|I|L|F|D|P|N)"),
            (ir_node::STORE_B_OF_CLASS, "StoreB"),
            (ir_node::STORE_C_OF_CLASS, "StoreC"),
            (ir_node::STORE_D_OF_CLASS, "StoreD"),
            (ir_node::STORE_F_OF_CLASS, "StoreF"),
            (ir_node::STORE_I_OF_CLASS, "StoreI"),
            (ir_node::STORE_L_OF_CLASS, "StoreL"),
            (ir_node::STORE_N_OF_CLASS, "StoreN"),
            (ir_node::STORE_P_OF_CLASS, "StoreP"),
        ];
        const LOADS: [(&str, &str); 12] = [
            (ir_node::LOAD, "Load(B|UB|S|US|I|L|F|D|P|N)"),
            (ir_node::LOAD_B, "LoadB"),
            (ir_node::LOAD_D, "LoadD"),
            (ir_node::LOAD_F, "LoadF"),
            (ir_node::LOAD_I, "LoadI"),
            (ir_node::LOAD_KLASS, "LoadK"),
            (ir_node::LOAD_L, "LoadL"),
            (ir_node::LOAD_N, "LoadN"),
            (ir_node::LOAD_P, "LoadP"),
            (ir_node::LOAD_S, "LoadS"),
            (ir_node::LOAD_UB, "LoadUB"),
            (ir_node::LOAD_US, "LoadUS"),
        ];
        const LOADS_OF_CLASS: [(&str, &str); 11] = [
            (ir_node::LOAD_OF_CLASS, "Load(B|UB|S|US|I|L|F|D|P|N)"),
            (ir_node::LOAD_B_OF_CLASS, "LoadB"),
            (ir_node::LOAD_D_OF_CLASS, "LoadD"),
            (ir_node::LOAD_F_OF_CLASS, "LoadF"),
            (ir_node::LOAD_I_OF_CLASS, "LoadI"),
            (ir_node::LOAD_L_OF_CLASS, "LoadL"),
            (ir_node::LOAD_N_OF_CLASS, "LoadN"),
            (ir_node::LOAD_P_OF_CLASS, "LoadP"),
            (ir_node::LOAD_S_OF_CLASS, "LoadS"),
            (ir_node::LOAD_UB_OF_CLASS, "LoadUB"),
            (ir_node::LOAD_US_OF_CLASS, "LoadUS"),
        ];

        for (node, name) in STORES.into_iter().chain(LOADS) {
            self.all_ideal(node, ideal(name));
        }
        for (node, name) in STORES_OF_CLASS.into_iter().chain(LOADS_OF_CLASS) {
            self.all_ideal(node, of_class(name));
        }
        self.all_ideal(ir_node::STORE_OF_FIELD, of_field("Store(B|C|S|I|L|F|D|P|N)"));
        self.all_ideal(ir_node::LOAD_OF_FIELD, of_field("Load(B|C|S|I|L|F|D|P|N)"));

        self.all_ideal(ir_node::MEMBAR, ideal("MemBar"));
        self.ideal_only(ir_node::MEMBAR_STORESTORE, ideal("MemBarStoreStore"));
        self.ideal_only(ir_node::SAFEPOINT, ideal("SafePoint"));
        self.ideal_only(ir_node::FAST_LOCK, ideal("FastLock"));
        self.ranged(
            ir_node::FAST_UNLOCK,
            ideal("FastUnlock"),
            CompilePhase::MacroExpansion,
            CompilePhase::BeforeMatching,
        );
    }

    fn register_control_nodes(&mut self) {
        self.require_loops(ir_node::LOOP, ideal("Loop"));
        self.counted_loops(ir_node::COUNTED_LOOP, ideal(r"CountedLoop\b"));
        self.counted_loops(ir_node::COUNTED_LOOP_MAIN, ideal_with(r"CountedLoop\b", "main"));
        self.ranged(
            ir_node::LONG_COUNTED_LOOP,
            ideal(r"LongCountedLoop\b"),
            CompilePhase::AfterCloops,
            CompilePhase::BeforeMatching,
        );
        self.ranged(
            ir_node::OUTER_STRIP_MINED_LOOP,
            ideal(r"OuterStripMinedLoop\b"),
            CompilePhase::AfterCloops,
            CompilePhase::BeforeMatching,
        );
        self.all_ideal(ir_node::IF, ideal(r"If\b"));
        self.ideal_only(ir_node::PHI, ideal("Phi"));
        self.ideal_only(ir_node::CMOVE_I, ideal("CMoveI"));

        self.all_ideal(ir_node::CALL, ideal("Call.*Java"));
        self.all_ideal(ir_node::CALL_OF_METHOD, call_of_method("Call.*Java"));
        self.all_ideal(ir_node::DYNAMIC_CALL_OF_METHOD, call_of_method("CallDynamicJava"));
        self.all_ideal(ir_node::STATIC_CALL_OF_METHOD, call_of_method("CallStaticJava"));

        const TRAPS: [(&str, &str); 10] = [
            (ir_node::TRAP, "reason"),
            (ir_node::PREDICATE_TRAP, "predicate"),
            (ir_node::UNSTABLE_IF_TRAP, "unstable_if"),
            (ir_node::CLASS_CHECK_TRAP, "class_check"),
            (ir_node::NULL_CHECK_TRAP, "null_check"),
            (ir_node::NULL_ASSERT_TRAP, "null_assert"),
            (ir_node::RANGE_CHECK_TRAP, "range_check"),
            (ir_node::UNHANDLED_TRAP, "unhandled"),
            (ir_node::INTRINSIC_TRAP, "intrinsic"),
            (ir_node::INTRINSIC_OR_TYPE_CHECKED_INLINING_TRAP, "intrinsic_or_type_checked_inlining"),
        ];
        for (node, reason) in TRAPS {
            self.all_ideal(node, trap(reason));
        }
        self.ideal_only(ir_node::DIV_BY_ZERO_TRAP, trap("div0_check"));
    }

    fn register_arithmetic_nodes(&mut self) {
        const ALL_IDEAL: [(&str, &str); 20] = [
            (ir_node::ABS_D, "AbsD"),
            (ir_node::ABS_F, "AbsF"),
            (ir_node::ABS_I, "AbsI"),
            (ir_node::ABS_L, "AbsL"),
            (ir_node::ADD_I, "AddI"),
            (ir_node::ADD_L, "AddL"),
            (ir_node::ADD_VD, "AddVD"),
            (ir_node::AND_I, "AndI"),
            (ir_node::AND_L, "AndL"),
            (ir_node::CONV_I2L, "ConvI2L"),
            (ir_node::LSHIFT_I, "LShiftI"),
            (ir_node::LSHIFT_L, "LShiftL"),
            (ir_node::MUL_I, "MulI"),
            (ir_node::MUL_L, "MulL"),
            (ir_node::SUB_D, "SubD"),
            (ir_node::SUB_F, "SubF"),
            (ir_node::SUB_I, "SubI"),
            (ir_node::SUB_L, "SubL"),
            (ir_node::XOR_I, "XorI"),
            (ir_node::XOR_L, "XorL"),
        ];
        for (node, name) in ALL_IDEAL {
            self.all_ideal(node, ideal(name));
        }

        const PRINT_IDEAL_ONLY: [(&str, &str); 38] = [
            (ir_node::ADD, "Add(I|L|F|D|P)"),
            (ir_node::AND, "And(I|L)"),
            (ir_node::CAST_II, "CastII"),
            (ir_node::CAST_LL, "CastLL"),
            (ir_node::CMP_I, r"CmpI\b"),
            (ir_node::CMP_L, r"CmpL\b"),
            (ir_node::CMP_U, r"CmpU\b"),
            (ir_node::CMP_U3, "CmpU3"),
            (ir_node::CMP_UL, r"CmpUL\b"),
            (ir_node::CMP_UL3, "CmpUL3"),
            (ir_node::COMPRESS_BITS, "CompressBits"),
            (ir_node::EXPAND_BITS, "ExpandBits"),
            (ir_node::CONV_L2I, "ConvL2I"),
            (ir_node::CON_I, "ConI"),
            (ir_node::CON_L, "ConL"),
            (ir_node::DIV, "Div(I|L|F|D)"),
            (ir_node::DIV_L, "DivL"),
            (ir_node::LSHIFT, "LShift(I|L)"),
            (ir_node::MAX_I, "MaxI"),
            (ir_node::MIN_I, "MinI"),
            (ir_node::MUL, "Mul(I|L|F|D)"),
            (ir_node::MUL_F, "MulF"),
            (ir_node::POPCOUNT_L, "PopCountL"),
            (ir_node::REVERSE_I, "ReverseI"),
            (ir_node::REVERSE_L, "ReverseL"),
            (ir_node::RSHIFT, "RShift(I|L)"),
            (ir_node::RSHIFT_I, "RShiftI"),
            (ir_node::RSHIFT_L, "RShiftL"),
            (ir_node::SUB, "Sub(I|L|F|D)"),
            (ir_node::UDIV_I, "UDivI"),
            (ir_node::UDIV_L, "UDivL"),
            (ir_node::UDIV_MOD_I, "UDivModI"),
            (ir_node::UDIV_MOD_L, "UDivModL"),
            (ir_node::UMOD_I, "UModI"),
            (ir_node::UMOD_L, "UModL"),
            (ir_node::URSHIFT, "URShift(B|S|I|L)"),
            (ir_node::URSHIFT_I, "URShiftI"),
            (ir_node::URSHIFT_L, "URShiftL"),
        ];
        for (node, name) in PRINT_IDEAL_ONLY {
            self.ideal_only(node, ideal(name));
        }
    }

    fn register_vector_nodes(&mut self) {
        const LOOP_ONLY: [(&str, &str); 12] = [
            (ir_node::LOAD_VECTOR, "LoadVector"),
            (ir_node::STORE_VECTOR, "StoreVector"),
            (ir_node::VECTOR_CAST_B2X, "VectorCastB2X"),
            (ir_node::VECTOR_CAST_D2X, "VectorCastD2X"),
            (ir_node::VECTOR_CAST_F2X, "VectorCastF2X"),
            (ir_node::VECTOR_CAST_I2X, "VectorCastI2X"),
            (ir_node::VECTOR_CAST_L2X, "VectorCastL2X"),
            (ir_node::VECTOR_CAST_S2X, "VectorCastS2X"),
            (ir_node::VECTOR_REINTERPRET, "VectorReinterpret"),
            (ir_node::VECTOR_UCAST_B2X, "VectorUCastB2X"),
            (ir_node::VECTOR_UCAST_I2X, "VectorUCastI2X"),
            (ir_node::VECTOR_UCAST_S2X, "VectorUCastS2X"),
        ];
        for (node, name) in LOOP_ONLY {
            self.require_loops(node, ideal(name));
        }

        const PRINT_IDEAL_ONLY: [(&str, &str); 18] = [
            (ir_node::ADD_VI, "AddVI"),
            (ir_node::AND_V, "AndV"),
            (ir_node::AND_V_MASK, "AndVMask"),
            (ir_node::MAX_V, "MaxV"),
            (ir_node::MIN_V, "MinV"),
            (ir_node::OR_V, "OrV"),
            (ir_node::OR_V_MASK, "OrVMask"),
            (ir_node::REVERSE_BYTES_V, "ReverseBytesV"),
            (ir_node::REVERSE_V, "ReverseV"),
            (ir_node::ROUND_VD, "RoundVD"),
            (ir_node::ROUND_VF, "RoundVF"),
            (ir_node::RSHIFT_VB, "RShiftVB"),
            (ir_node::RSHIFT_VS, "RShiftVS"),
            (ir_node::SIGNUM_VD, "SignumVD"),
            (ir_node::SIGNUM_VF, "SignumVF"),
            (ir_node::VECTOR_BLEND, "VectorBlend"),
            (ir_node::XOR_V, "XorV"),
            (ir_node::XOR_V_MASK, "XorVMask"),
        ];
        for (node, name) in PRINT_IDEAL_ONLY {
            self.ideal_only(node, ideal(name));
        }

        self.ranged(
            ir_node::POPULATE_INDEX,
            ideal("PopulateIndex"),
            CompilePhase::AfterCloops,
            CompilePhase::BeforeMatching,
        );
    }

    fn register_allocation_nodes(&mut self) {
        self.alloc_node(ir_node::ALLOC, ideal("Allocate"), regexes::opto_alloc());
        self.alloc_node(ir_node::ALLOC_ARRAY, ideal("AllocateArray"), regexes::opto_alloc_array());
        self.opto_only(ir_node::ALLOC_OF, regexes::opto_alloc_of());
        self.opto_only(ir_node::ALLOC_ARRAY_OF, regexes::opto_alloc_array_of());
        self.opto_only(ir_node::CHECKCAST_ARRAY, regexes::opto_checkcast_array());
        self.opto_only(ir_node::CHECKCAST_ARRAY_OF, regexes::opto_checkcast_array_of());
        self.opto_only(ir_node::CHECKCAST_ARRAYCOPY, regexes::opto_checkcast_arraycopy());
        self.opto_only(ir_node::FIELD_ACCESS, regexes::opto_field_access());
        self.opto_only(ir_node::SCOPE_OBJECT, regexes::opto_scope_object());
    }
}

impl Default for NodeMappingTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::node_mappings::domain::IS_REPLACED;
    use regex::Regex;

    #[test]
    fn test_every_placeholder_is_mapped() {
        let table = NodeMappingTable::new();
        for node in ir_node::STANDALONE_NODES {
            let entry = table.get(node).unwrap_or_else(|| panic!("{node} not mapped"));
            assert!(!entry.is_composite(), "{node} must not need a postfix");
        }
        for node in ir_node::COMPOSITE_NODES {
            let entry = table.get(node).unwrap_or_else(|| panic!("{node} not mapped"));
            assert!(entry.is_composite(), "{node} must need a postfix");
        }
        assert_eq!(
            table.len(),
            ir_node::STANDALONE_NODES.len() + ir_node::COMPOSITE_NODES.len()
        );
    }

    #[test]
    fn test_every_regex_compiles_on_every_valid_phase() {
        let table = NodeMappingTable::new();
        for node in table.nodes() {
            let entry = table.get(node).unwrap();
            let phases = entry.valid_phases();
            assert!(!phases.is_empty(), "{node} has no valid phase");
            for phase in phases {
                let pattern = entry.regex_for(phase).unwrap().replace(IS_REPLACED, "Foo");
                assert!(Regex::new(&pattern).is_ok(), "{node} on {phase}: {pattern}");
            }
        }
    }

    #[test]
    fn test_regex_for_phase_windows() {
        let table = NodeMappingTable::new();
        assert!(table.regex_for(ir_node::STORE_I, CompilePhase::AfterParsing).is_ok());
        assert!(table.regex_for(ir_node::PHI, CompilePhase::PrintIdeal).is_ok());

        let err = table.regex_for(ir_node::LOOP, CompilePhase::AfterParsing).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::NoRegexForPhase);
        assert!(err.message.contains("AFTER_PARSING"));

        let err = table
            .regex_for(ir_node::COUNTED_LOOP, CompilePhase::BeforeCloops)
            .unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::NoRegexForPhase);
        assert!(table.regex_for(ir_node::COUNTED_LOOP, CompilePhase::AfterCloops).is_ok());
    }

    #[test]
    fn test_default_phases() {
        let table = NodeMappingTable::new();
        assert_eq!(table.default_phase(ir_node::STORE_I).unwrap(), CompilePhase::PrintIdeal);
        assert_eq!(
            table.default_phase(ir_node::ALLOC).unwrap(),
            CompilePhase::PrintOptoAssembly
        );
        assert_eq!(
            table.default_phase(ir_node::FIELD_ACCESS).unwrap(),
            CompilePhase::PrintOptoAssembly
        );

        let err = table.default_phase("StoreI").unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::NoDefaultPhase);

        let err = table.default_phase("_#NOT_A_NODE#_").unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::UndefinedPlaceholder);
    }

    #[test]
    fn test_alloc_uses_ideal_regex_before_macro_expansion() {
        let table = NodeMappingTable::new();
        let ideal = table.regex_for(ir_node::ALLOC, CompilePhase::AfterParsing).unwrap();
        let opto = table.regex_for(ir_node::ALLOC, CompilePhase::PrintOptoAssembly).unwrap();
        assert_ne!(ideal, opto);
        assert!(table.regex_for(ir_node::ALLOC, CompilePhase::PrintIdeal).is_err());
    }

    #[test]
    fn test_composite_mismatch() {
        let table = NodeMappingTable::new();
        let err = table
            .regex_for("_#STORE_OF_CLASS#_", CompilePhase::PrintIdeal)
            .unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::CompositeMismatch);
        assert!(err.message.contains(ir_node::STORE_OF_CLASS));
        assert!(table.is_composite(ir_node::STORE_OF_CLASS));
        assert!(!table.is_composite(ir_node::STORE_I));
    }
}
