//! Shared log fixtures for irmatch integration tests

#![allow(dead_code)]

use irmatch::{IrMatcher, MatchVerdict, MatcherConfig, MethodDeclaration, NodeMappingTable};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

pub const TEST_CLASS: &str = "compiler.c2.irTests.TestBasics";
const CLASS_PATH: &str = "compiler/c2/irTests/TestBasics";

/// Compile id assignment as written by `-XX:+LogCompilation`
pub fn task_queued(compile_id: u32, method: &str) -> String {
    format!(
        "<task_queued compile_id='{compile_id}' method='{CLASS_PATH} {method} ()V' bytes='17' count='5000' \
         backedge_count='5000' iicount='5000' level='4' stamp='0.412' comment='tiered' hot_count='5000'/>\n"
    )
}

/// `<ideal>` dump of one compile phase
pub fn ideal_block(compile_id: u32, phase: &str, body: &str) -> String {
    format!("<ideal compile_id='{compile_id}' compile_phase='{phase}'>\n{body}</ideal>\n")
}

pub fn print_ideal(compile_id: u32, body: &str) -> String {
    ideal_block(compile_id, "PrintIdeal", body)
}

pub fn opto_block(compile_id: u32, body: &str) -> String {
    format!("<opto_assembly compile_id='{compile_id}' kind='compiled'>\n{body}</opto_assembly>\n")
}

pub fn store_i(id: u32) -> String {
    format!(
        " {id}  StoreI  === 5 7 {} 8  [[ 16 ]]  @int[int:>=0]:exact+any *, idx=4; \
         Memory: @int[int:>=0]:NotNull:exact+any *, idx=4; !jvms: TestBasics::test @ bci:3 (line 42)\n",
        id - 1
    )
}

pub fn load_i(id: u32) -> String {
    format!(" {id}  LoadI  === _ 7 {}  [[ 20 ]]  @int[int:>=0]:exact+any *, idx=4; #int\n", id - 1)
}

pub fn return_node(id: u32) -> String {
    format!(" {id}  Return  === 5 6 7 8 9 returns 10  [[ 0 ]]\n")
}

/// Unrelated VM output between dumps
pub fn noise() -> String {
    "<writer thread='1234'/>\n<nmethod compile_id='99' compiler='c1' level='3' entry='0x00007f'/>\n".to_string()
}

pub fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn run_log(log: &str, methods: &[MethodDeclaration]) -> MatchVerdict {
    run_log_with(MatcherConfig::default(), log, methods)
}

pub fn run_log_with(config: MatcherConfig, log: &str, methods: &[MethodDeclaration]) -> MatchVerdict {
    let table = NodeMappingTable::new();
    IrMatcher::new(&table, config)
        .run_reader(Cursor::new(log), "hotspot_pid1234.log", TEST_CLASS, methods)
        .unwrap()
}
