use anyhow::Result;
use insta::assert_snapshot;

use crate::CliTest;

#[test]
fn test_merge_sample_project() -> Result<()> {
    let test = CliTest::sample_project()?;

    let output = test.merge_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Merged 3 files into"));
    assert!(stdout.contains("2 headers, 1 source, 2 global includes, 0 duplicate headers skipped"));

    assert_snapshot!(test.read_file("main.cpp")?, @r#"
    // Merged translation unit generated by cmerge
    // Total files merged: 3
    // WARNING: Review this file carefully for compilation and logic errors.
    // Issues like multiple main() functions, global variable redefinitions,
    // and order-dependent declarations might need manual fixing.

    // --- Unique Global Includes (from all files) ---
    #include <iostream>
    #include <string>
    // --- End of Unique Global Includes ---

    // --- Start of content from sim/include/config.h ---
    // Original include guard: CONFIG_H
    const int V=1;
    // --- End of content from sim/include/config.h ---

    // --- Start of content from sim/common/utils.h ---
    // Original pragma: #pragma once
    #include <string>
    std::string get_util_name();
    // --- End of content from sim/common/utils.h ---

    // --- Start of content from sim/simx/main.cpp ---
    // MERGED_LOCALLY: #include "config.h"
    // MERGED_LOCALLY: #include "utils.h"
    #include <iostream>
    int main() { return V; }
    // --- End of content from sim/simx/main.cpp ---
    "#);

    Ok(())
}

#[test]
fn test_merge_is_deterministic() -> Result<()> {
    let test = CliTest::sample_project()?;
    test.write_file("sim/common/b.cpp", "#include <vector>\nint b;\n")?;
    test.write_file("sim/common/a.cpp", "#include <map>\nint a;\n")?;

    test.merge_command().output()?;
    let first = test.read_file("main.cpp")?;
    test.merge_command().output()?;
    let second = test.read_file("main.cpp")?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_merge_output_inside_scanned_directory() -> Result<()> {
    let test = CliTest::sample_project()?;
    test.write_file(".cmergerc.json", r#"{ "output": "sim/simx/merged.cpp" }"#)?;

    test.merge_command().output()?;
    let first = test.read_file("sim/simx/merged.cpp")?;
    test.merge_command().output()?;
    let second = test.read_file("sim/simx/merged.cpp")?;

    assert!(second.contains("// Total files merged: 3"));
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_merge_duplicate_header_basename() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("sim/include/types.h", "#pragma once\nstruct A {};\n")?;
    test.write_file("sim/simx/types.h", "#pragma once\nstruct B {};\n")?;

    let output = test.merge_command().output()?;
    assert!(output.status.success());

    let merged = test.read_file("main.cpp")?;
    assert!(merged.contains("struct A {};"));
    assert!(!merged.contains("struct B {};"));
    assert!(merged.contains("// --- Content of sim/simx/types.h (already included/processed) ---"));
    assert!(output.stdout.starts_with(b"\xE2\x9C\x93 Merged 2 files"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 duplicate header skipped"));

    Ok(())
}

#[test]
fn test_merge_missing_directory_is_warning() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("sim/include/a.h", "int a;\n")?;

    let output = test.merge_command().output()?;
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning: Directory 'sim/common' not found. Skipping."));
    assert!(stderr.contains("warning: Directory 'sim/simx' not found. Skipping."));
    assert!(test.read_file("main.cpp")?.contains("int a;"));

    Ok(())
}

#[test]
fn test_merge_unreadable_file_does_not_abort() -> Result<()> {
    let test = CliTest::sample_project()?;
    test.write_file("sim/common/binary.cpp", [0xffu8, 0xfe, 0x00, 0x41])?;

    let output = test.merge_command().output()?;
    assert!(output.status.success());

    let merged = test.read_file("main.cpp")?;
    assert!(merged.contains("// ERROR: Could not read file sim/common/binary.cpp due to"));
    assert!(merged.contains("// ERROR: Could not process file sim/common/binary.cpp due to"));
    assert!(merged.contains("int main() { return V; }"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: Could not process sim/common/binary.cpp"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 file(s) could not be processed"));

    Ok(())
}

#[test]
fn test_merge_to_stdout() -> Result<()> {
    let test = CliTest::sample_project()?;

    let output = test.merge_command().arg("--stdout").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("// Merged translation unit generated by cmerge\n"));
    assert!(stdout.contains("const int V=1;"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Merged 3 files into stdout"));
    assert!(!test.root().join("main.cpp").exists());

    Ok(())
}

#[test]
fn test_merge_stdout_overrides_output_env() -> Result<()> {
    let test = CliTest::sample_project()?;

    let output = test
        .merge_command()
        .env("CMERGE_OUTPUT", "from_env.cpp")
        .arg("--stdout")
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(String::from_utf8_lossy(&output.stdout).contains("const int V=1;"));
    assert!(!test.root().join("from_env.cpp").exists());
    assert!(!test.root().join("main.cpp").exists());

    Ok(())
}

#[test]
fn test_merge_output_flag() -> Result<()> {
    let test = CliTest::sample_project()?;

    let output = test
        .merge_command()
        .args(["-o", "build/amalgamated.cpp"])
        .output()?;
    assert!(output.status.success());

    assert!(test.read_file("build/amalgamated.cpp")?.contains("// Total files merged: 3"));
    assert!(!test.root().join("main.cpp").exists());

    Ok(())
}

#[test]
fn test_merge_dir_overrides() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("include/lib.h", "#ifndef LIB_H\n#define LIB_H\nint lib();\n#endif // LIB_H\n")?;
    test.write_file("src/lib.c", "#include \"lib.h\"\n#include <stdio.h>\nint lib() { return 0; }\n")?;
    test.write_file(
        ".cmergerc.json",
        r#"{ "headerExtensions": ["h"], "sourceExtensions": ["c"], "output": "all.c" }"#,
    )?;

    let output = test
        .merge_command()
        .args(["--dir", "src", "--dir", "include", "--priority-dir", "include"])
        .output()?;
    assert!(output.status.success());

    let merged = test.read_file("all.c")?;
    let header_at = merged.find("// --- Start of content from include/lib.h ---").unwrap();
    let source_at = merged.find("// --- Start of content from src/lib.c ---").unwrap();
    assert!(header_at < source_at);
    assert!(merged.contains("// MERGED_LOCALLY: #include \"lib.h\""));
    assert!(!merged.contains("#endif // LIB_H"));

    Ok(())
}

#[test]
fn test_merge_verbose_logs_rewrites() -> Result<()> {
    let test = CliTest::sample_project()?;

    let output = test.merge_command().arg("-v").output()?;
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Processing sim/include/config.h..."));
    assert!(stderr.contains(
        "note: Commented out local include: #include \"config.h\" (from sim/simx/main.cpp)"
    ));

    Ok(())
}

#[test]
fn test_merge_invalid_config_fails() -> Result<()> {
    let test = CliTest::sample_project()?;
    test.write_file(".cmergerc.json", r#"{ "directories": [] }"#)?;

    let output = test.merge_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
    assert!(!test.root().join("main.cpp").exists());

    Ok(())
}
