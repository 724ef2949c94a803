use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use super::super::args::MergeArgs;
use super::{CommandResult, CommandSummary, MergeSummary};
use crate::core::{MergeContext, MergeOutput, SourceFile, merge_files, write_merged};

pub fn merge(args: MergeArgs) -> Result<CommandResult> {
    let ctx = MergeContext::new(&args.common)?;

    let output_path = (!args.stdout).then(|| ctx.output_path(args.output.as_deref()));

    // A previous merge result inside a scanned directory must not merge itself.
    let files: Vec<SourceFile> = match &output_path {
        Some(path) => ctx
            .scan
            .files
            .iter()
            .filter(|f| !is_same_file(&f.path, path))
            .cloned()
            .collect(),
        None => ctx.scan.files.clone(),
    };

    let output = merge_files(&ctx.root_dir, &ctx.config, &files);

    match &output_path {
        Some(path) => write_output_file(path, &output)?,
        None => {
            let mut stdout = io::stdout().lock();
            write_merged(&output, &mut stdout).context("Failed to write merged output")?;
            stdout.flush()?;
        }
    }

    let header_count = files.iter().filter(|f| f.is_header()).count();
    let summary = MergeSummary {
        output: output_path,
        file_count: output.file_count,
        header_count,
        source_count: files.len() - header_count,
        global_include_count: output.global_includes.len(),
        suppressed_count: output.suppressed_count(),
        failed_count: output.failed_count(),
    };

    Ok(CommandResult {
        summary: CommandSummary::Merge(summary),
        missing_dirs: ctx.scan.missing_dirs,
        skipped_count: ctx.scan.skipped_count,
        events: output.events,
    })
}

fn write_output_file(path: &Path, output: &MergeOutput) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_merged(output, &mut writer)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
