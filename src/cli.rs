//! Minimal CLI: infer → (apex | tree)
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::codegen::{self, DEFAULT_INDENT_WIDTH, Style};
use crate::inference::{self, DEFAULT_ROOT_NAME};
use crate::ir::TypeTree;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer Apex classes from a sample JSON document
#[derive(Parser, Debug)]
#[command(name = "json-apex", version)]
pub struct CommandLineInterface {
    /// list every inferred record type (debug logging)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and write `<class-name>.cls` (plus `Test<class-name>.cls`)
    Apex(ApexOut),
    /// infer and print the record tree as JSON (debug view)
    Tree(TreeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON input file, or '-' for stdin
    #[arg(default_value = "-")]
    input: String,

    /// JSON Pointer selecting the object to infer from (e.g. /data/items/0)
    #[arg(long)]
    json_pointer: Option<String>,
}

#[derive(clap::Parser, Debug)]
struct ApexOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// directory where class files are written (created if absent)
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// name of the top-level class
    #[arg(long, default_value = DEFAULT_ROOT_NAME)]
    class_name: String,

    /// spaces per indentation level
    #[arg(long, default_value_t = DEFAULT_INDENT_WIDTH)]
    indent_spaces: usize,

    /// also write a smoke-test class embedding the input document
    #[arg(long, default_value_t = false)]
    generate_test: bool,

    /// add a static `parse(String json)` factory to the top-level class
    #[arg(long, default_value_t = false)]
    parse_method: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct TreeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// name of the top-level record
    #[arg(long, default_value = DEFAULT_ROOT_NAME)]
    class_name: String,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Value> {
        let source = if self.input == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read JSON from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&self.input)
                .with_context(|| format!("failed to read input file {}", self.input))?
        };
        let document = crate::path_de::document_from_str(&source)
            .with_context(|| format!("failed to parse JSON source ({})", self.input))?;
        let document = crate::path_de::select(document, self.json_pointer.as_deref())?;
        Ok(document)
    }
}

impl ApexOut {
    fn class_file(&self) -> PathBuf {
        self.output_dir.join(format!("{}.cls", self.class_name))
    }

    fn test_file(&self) -> PathBuf {
        self.output_dir.join(format!("Test{}.cls", self.class_name))
    }

    fn run(&self) -> Result<Vec<PathBuf>> {
        check_class_name(&self.class_name)?;
        // environment first: no inference work against an unusable target
        writable_dir(&self.output_dir)?;

        let document = self.input_settings.load()?;
        let tree = inference::infer(&document, &self.class_name)?;
        log_tree(&tree);

        let style = Style { indent_width: self.indent_spaces, parse_method: self.parse_method };
        let mut written = Vec::new();

        let class_path = self.class_file();
        write_file(&class_path, &codegen::emit(&tree, style))?;
        written.push(class_path);

        if self.generate_test {
            let test_src = codegen::emit_test(&self.class_name, &document, self.indent_spaces)?;
            let test_path = self.test_file();
            write_file(&test_path, &test_src)?;
            written.push(test_path);
        }
        Ok(written)
    }
}

impl TreeOut {
    fn run(&self) -> Result<()> {
        if let Some(out) = self.out.as_ref() {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                writable_dir(parent)?;
            }
        }
        let document = self.input_settings.load()?;
        let tree = inference::infer(&document, &self.class_name)?;
        log_tree(&tree);

        let mut tree_src = serde_json::to_string_pretty(&tree)?;
        tree_src.push_str(codegen::NEWLINE);
        match self.out.as_ref() {
            Some(out) => write_file(out, &tree_src)?,
            None => print!("{tree_src}"),
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Install the stderr subscriber. `RUST_LOG` applies unless `--verbose` is set.
    pub fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Apex(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let written = target.run()?;
                for path in &written {
                    tracing::info!(path = %path.display(), "wrote class file");
                }
                Ok(())
            }
            Command::Tree(target) => target.run(),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn check_class_name(name: &str) -> Result<()> {
    if !codegen::is_apex_identifier(name) {
        bail!("{name:?} is not a valid Apex class name");
    }
    Ok(())
}

/// Create `dir` if needed and prove we can write into it.
fn writable_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }
    if !dir.is_dir() {
        bail!("{} is not a valid directory path", dir.display());
    }
    // the probe file is removed when dropped
    tempfile::tempfile_in(dir)
        .with_context(|| format!("{} is not a writable directory", dir.display()))?;
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    out.write_all(contents.as_bytes())
        .and_then(|()| out.flush())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn log_tree(tree: &TypeTree) {
    tracing::debug!(count = tree.len(), root = tree.root_name(), "inferred record types");
    for name in tree.names() {
        let fields = tree.get(name).map_or(0, |r| r.fields.len());
        tracing::debug!(record = name, fields, "record type");
    }
}
