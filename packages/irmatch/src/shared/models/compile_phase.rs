//! Compile phases of the C2 pipeline
//!
//! Every phase carries an explicit ordinal. Validity windows of default
//! regexes are expressed as ordinal intervals, so ordering is implemented on
//! [`CompilePhase::ordinal`] and never on declaration order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Which kind of dump a phase produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegexType {
    /// Ideal graph dump (`<ideal ...>` blocks)
    Ideal,
    /// Machine graph dump (still printed as `<ideal ...>` blocks)
    Mach,
    /// PrintOptoAssembly output (`<opto_assembly ...>` blocks)
    OptoAssembly,
}

/// What to do when the same phase is dumped more than once for a compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatPolicy {
    KeepFirst,
    KeepLast,
}

/// Compile phase on which an IR rule can be matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompilePhase {
    /// Meta phase: use the default phase of each placeholder in the rule
    Default,

    BeforeStringopts,
    AfterStringopts,
    BeforeRemoveuseless,
    AfterParsing,
    IterGvn1,
    ExpandVunbox,
    ScalarizeVbox,
    InlineVectorRebox,
    ExpandVbox,
    EliminateVboxAlloc,
    IterGvnBeforeEa,
    IterGvnAfterVector,
    AfterBeautifyLoops,
    BeforeCloops,
    AfterCloops,
    PhaseidealBeforeEa,
    AfterEa,
    IterGvnAfterEa,
    IterGvnAfterElimination,
    Phaseidealloop1,
    Phaseidealloop2,
    Phaseidealloop3,
    Ccp1,
    IterGvn2,
    PhaseidealloopIterations,
    OptimizeFinished,
    MacroExpansion,
    BarrierExpansion,
    BeforeMatching,

    // Mach phases
    Matching,
    GlobalCodeMotion,
    FinalCode,

    /// `-XX:+PrintIdeal` output
    PrintIdeal,
    /// Meta phase: `-XX:+PrintOptoAssembly` output
    PrintOptoAssembly,
}

impl CompilePhase {
    /// All phases in ordinal order
    pub const ALL: [CompilePhase; 35] = [
        CompilePhase::Default,
        CompilePhase::BeforeStringopts,
        CompilePhase::AfterStringopts,
        CompilePhase::BeforeRemoveuseless,
        CompilePhase::AfterParsing,
        CompilePhase::IterGvn1,
        CompilePhase::ExpandVunbox,
        CompilePhase::ScalarizeVbox,
        CompilePhase::InlineVectorRebox,
        CompilePhase::ExpandVbox,
        CompilePhase::EliminateVboxAlloc,
        CompilePhase::IterGvnBeforeEa,
        CompilePhase::IterGvnAfterVector,
        CompilePhase::AfterBeautifyLoops,
        CompilePhase::BeforeCloops,
        CompilePhase::AfterCloops,
        CompilePhase::PhaseidealBeforeEa,
        CompilePhase::AfterEa,
        CompilePhase::IterGvnAfterEa,
        CompilePhase::IterGvnAfterElimination,
        CompilePhase::Phaseidealloop1,
        CompilePhase::Phaseidealloop2,
        CompilePhase::Phaseidealloop3,
        CompilePhase::Ccp1,
        CompilePhase::IterGvn2,
        CompilePhase::PhaseidealloopIterations,
        CompilePhase::OptimizeFinished,
        CompilePhase::MacroExpansion,
        CompilePhase::BarrierExpansion,
        CompilePhase::BeforeMatching,
        CompilePhase::Matching,
        CompilePhase::GlobalCodeMotion,
        CompilePhase::FinalCode,
        CompilePhase::PrintIdeal,
        CompilePhase::PrintOptoAssembly,
    ];

    /// Position in the compiler pipeline. Gaps leave room for new phases.
    pub fn ordinal(self) -> u16 {
        match self {
            CompilePhase::Default => 0,
            CompilePhase::BeforeStringopts => 100,
            CompilePhase::AfterStringopts => 110,
            CompilePhase::BeforeRemoveuseless => 120,
            CompilePhase::AfterParsing => 130,
            CompilePhase::IterGvn1 => 140,
            CompilePhase::ExpandVunbox => 150,
            CompilePhase::ScalarizeVbox => 160,
            CompilePhase::InlineVectorRebox => 170,
            CompilePhase::ExpandVbox => 180,
            CompilePhase::EliminateVboxAlloc => 190,
            CompilePhase::IterGvnBeforeEa => 200,
            CompilePhase::IterGvnAfterVector => 210,
            CompilePhase::AfterBeautifyLoops => 220,
            CompilePhase::BeforeCloops => 230,
            CompilePhase::AfterCloops => 240,
            CompilePhase::PhaseidealBeforeEa => 250,
            CompilePhase::AfterEa => 260,
            CompilePhase::IterGvnAfterEa => 270,
            CompilePhase::IterGvnAfterElimination => 280,
            CompilePhase::Phaseidealloop1 => 290,
            CompilePhase::Phaseidealloop2 => 300,
            CompilePhase::Phaseidealloop3 => 310,
            CompilePhase::Ccp1 => 320,
            CompilePhase::IterGvn2 => 330,
            CompilePhase::PhaseidealloopIterations => 340,
            CompilePhase::OptimizeFinished => 350,
            CompilePhase::MacroExpansion => 360,
            CompilePhase::BarrierExpansion => 370,
            CompilePhase::BeforeMatching => 380,
            CompilePhase::Matching => 400,
            CompilePhase::GlobalCodeMotion => 410,
            CompilePhase::FinalCode => 420,
            CompilePhase::PrintIdeal => 900,
            CompilePhase::PrintOptoAssembly => 910,
        }
    }

    /// Name used in the `compile_phase='...'` attribute of the log
    pub fn description(self) -> &'static str {
        match self {
            CompilePhase::Default => "For IR node placeholder strings only",
            CompilePhase::BeforeStringopts => "Before StringOpts",
            CompilePhase::AfterStringopts => "After StringOpts",
            CompilePhase::BeforeRemoveuseless => "Before RemoveUseless",
            CompilePhase::AfterParsing => "After Parsing",
            CompilePhase::IterGvn1 => "Iter GVN 1",
            CompilePhase::ExpandVunbox => "Expand VectorUnbox",
            CompilePhase::ScalarizeVbox => "Scalarize VectorBox",
            CompilePhase::InlineVectorRebox => "Inline Vector Rebox Calls",
            CompilePhase::ExpandVbox => "Expand VectorBox",
            CompilePhase::EliminateVboxAlloc => "Eliminate VectorBoxAllocate",
            CompilePhase::IterGvnBeforeEa => "Iter GVN before EA",
            CompilePhase::IterGvnAfterVector => "Iter GVN after vector box elimination",
            CompilePhase::AfterBeautifyLoops => "After beautify loops",
            CompilePhase::BeforeCloops => "Before CountedLoop",
            CompilePhase::AfterCloops => "After CountedLoop",
            CompilePhase::PhaseidealBeforeEa => "PhaseIdealLoop before EA",
            CompilePhase::AfterEa => "After Escape Analysis",
            CompilePhase::IterGvnAfterEa => "Iter GVN after EA",
            CompilePhase::IterGvnAfterElimination => {
                "Iter GVN after eliminating allocations and locks"
            }
            CompilePhase::Phaseidealloop1 => "PhaseIdealLoop 1",
            CompilePhase::Phaseidealloop2 => "PhaseIdealLoop 2",
            CompilePhase::Phaseidealloop3 => "PhaseIdealLoop 3",
            CompilePhase::Ccp1 => "PhaseCCP 1",
            CompilePhase::IterGvn2 => "Iter GVN 2",
            CompilePhase::PhaseidealloopIterations => "PhaseIdealLoop iterations",
            CompilePhase::OptimizeFinished => "Optimize finished",
            CompilePhase::MacroExpansion => "Macro expand",
            CompilePhase::BarrierExpansion => "Barrier expand",
            CompilePhase::BeforeMatching => "Before matching",
            CompilePhase::Matching => "After matching",
            CompilePhase::GlobalCodeMotion => "Global code motion",
            CompilePhase::FinalCode => "Final Code",
            CompilePhase::PrintIdeal => "PrintIdeal",
            CompilePhase::PrintOptoAssembly => "PrintOptoAssembly",
        }
    }

    /// `SCREAMING_SNAKE_CASE` name as written in rule declarations
    pub fn name(self) -> &'static str {
        match self {
            CompilePhase::Default => "DEFAULT",
            CompilePhase::BeforeStringopts => "BEFORE_STRINGOPTS",
            CompilePhase::AfterStringopts => "AFTER_STRINGOPTS",
            CompilePhase::BeforeRemoveuseless => "BEFORE_REMOVEUSELESS",
            CompilePhase::AfterParsing => "AFTER_PARSING",
            CompilePhase::IterGvn1 => "ITER_GVN1",
            CompilePhase::ExpandVunbox => "EXPAND_VUNBOX",
            CompilePhase::ScalarizeVbox => "SCALARIZE_VBOX",
            CompilePhase::InlineVectorRebox => "INLINE_VECTOR_REBOX",
            CompilePhase::ExpandVbox => "EXPAND_VBOX",
            CompilePhase::EliminateVboxAlloc => "ELIMINATE_VBOX_ALLOC",
            CompilePhase::IterGvnBeforeEa => "ITER_GVN_BEFORE_EA",
            CompilePhase::IterGvnAfterVector => "ITER_GVN_AFTER_VECTOR",
            CompilePhase::AfterBeautifyLoops => "AFTER_BEAUTIFY_LOOPS",
            CompilePhase::BeforeCloops => "BEFORE_CLOOPS",
            CompilePhase::AfterCloops => "AFTER_CLOOPS",
            CompilePhase::PhaseidealBeforeEa => "PHASEIDEAL_BEFORE_EA",
            CompilePhase::AfterEa => "AFTER_EA",
            CompilePhase::IterGvnAfterEa => "ITER_GVN_AFTER_EA",
            CompilePhase::IterGvnAfterElimination => "ITER_GVN_AFTER_ELIMINATION",
            CompilePhase::Phaseidealloop1 => "PHASEIDEALLOOP1",
            CompilePhase::Phaseidealloop2 => "PHASEIDEALLOOP2",
            CompilePhase::Phaseidealloop3 => "PHASEIDEALLOOP3",
            CompilePhase::Ccp1 => "CCP1",
            CompilePhase::IterGvn2 => "ITER_GVN2",
            CompilePhase::PhaseidealloopIterations => "PHASEIDEALLOOP_ITERATIONS",
            CompilePhase::OptimizeFinished => "OPTIMIZE_FINISHED",
            CompilePhase::MacroExpansion => "MACRO_EXPANSION",
            CompilePhase::BarrierExpansion => "BARRIER_EXPANSION",
            CompilePhase::BeforeMatching => "BEFORE_MATCHING",
            CompilePhase::Matching => "MATCHING",
            CompilePhase::GlobalCodeMotion => "GLOBAL_CODE_MOTION",
            CompilePhase::FinalCode => "FINAL_CODE",
            CompilePhase::PrintIdeal => "PRINT_IDEAL",
            CompilePhase::PrintOptoAssembly => "PRINT_OPTO_ASSEMBLY",
        }
    }

    /// `None` for the DEFAULT meta phase
    pub fn regex_type(self) -> Option<RegexType> {
        match self {
            CompilePhase::Default => None,
            CompilePhase::Matching | CompilePhase::GlobalCodeMotion | CompilePhase::FinalCode => {
                Some(RegexType::Mach)
            }
            CompilePhase::PrintOptoAssembly => Some(RegexType::OptoAssembly),
            _ => Some(RegexType::Ideal),
        }
    }

    pub fn repeat_policy(self) -> RepeatPolicy {
        match self {
            // Emitted once per loop; the first dump is the one before any loop was converted
            CompilePhase::BeforeCloops => RepeatPolicy::KeepFirst,
            _ => RepeatPolicy::KeepLast,
        }
    }

    pub fn is_ideal(self) -> bool {
        self.regex_type() == Some(RegexType::Ideal)
    }

    /// Inclusive ordinal interval check
    pub fn is_between(self, from: CompilePhase, to: CompilePhase) -> bool {
        from.ordinal() <= self.ordinal() && self.ordinal() <= to.ordinal()
    }

    /// Ideal phases in which loop nodes may exist
    pub fn has_loops(self) -> bool {
        self.is_ideal() && self.ordinal() >= CompilePhase::AfterBeautifyLoops.ordinal()
    }

    /// Loop phases in which counted loops may exist
    pub fn has_counted_loops(self) -> bool {
        self.has_loops()
            && self != CompilePhase::AfterBeautifyLoops
            && self != CompilePhase::BeforeCloops
    }

    pub fn ideal_phases() -> Vec<CompilePhase> {
        Self::ALL.iter().copied().filter(|p| p.is_ideal()).collect()
    }

    /// Resolve the `compile_phase='...'` attribute of a block start line
    pub fn from_description(description: &str) -> Option<CompilePhase> {
        Self::ALL
            .iter()
            .copied()
            .filter(|p| *p != CompilePhase::Default)
            .find(|p| p.description() == description)
    }

    /// Resolve a `SCREAMING_SNAKE_CASE` phase name
    pub fn from_name(name: &str) -> Option<CompilePhase> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }
}

impl PartialOrd for CompilePhase {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CompilePhase {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl fmt::Display for CompilePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
