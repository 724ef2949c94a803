use std::io::{self, Write};

use super::merge::{FileBlock, MergeOutput};

const BANNER_WARNINGS: &[&str] = &[
    "// WARNING: Review this file carefully for compilation and logic errors.",
    "// Issues like multiple main() functions, global variable redefinitions,",
    "// and order-dependent declarations might need manual fixing.",
];

/// Writes the merged translation unit: banner, hoisted includes, then one
/// block per file in merge order.
pub fn write_merged<W: Write>(output: &MergeOutput, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "// Merged translation unit generated by cmerge")?;
    writeln!(writer, "// Total files merged: {}", output.file_count)?;
    for line in BANNER_WARNINGS {
        writeln!(writer, "{}", line)?;
    }
    writeln!(writer)?;

    for error in &output.collect_errors {
        write!(
            writer,
            "\n// ERROR: Could not read file {} due to {}\n\n",
            error.display, error.error
        )?;
    }

    if !output.global_includes.is_empty() {
        writeln!(writer, "// --- Unique Global Includes (from all files) ---")?;
        for line in output.global_includes.iter() {
            writeln!(writer, "{}", line)?;
        }
        writeln!(writer, "// --- End of Unique Global Includes ---")?;
        writeln!(writer)?;
    }

    for block in &output.blocks {
        write_block(block, writer)?;
    }

    Ok(())
}

fn write_block<W: Write>(block: &FileBlock, writer: &mut W) -> io::Result<()> {
    match block {
        FileBlock::Merged {
            display,
            annotation,
            body,
        } => {
            writeln!(writer, "// --- Start of content from {} ---", display)?;
            if let Some(annotation) = annotation {
                writeln!(writer, "{}", annotation)?;
            }
            writeln!(writer, "{}", body)?;
            write!(writer, "// --- End of content from {} ---\n\n", display)
        }
        FileBlock::AlreadyIncluded { display } => write!(
            writer,
            "// --- Content of {} (already included/processed) ---\n\n",
            display
        ),
        FileBlock::Failed { display, error } => write!(
            writer,
            "\n// ERROR: Could not process file {} due to {}\n\n",
            display, error
        ),
    }
}
