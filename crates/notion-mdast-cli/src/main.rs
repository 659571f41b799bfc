use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use notion_mdast_config::{Config, OutputFormat};
use notion_mdast_engine::{ValidationOptions, parse_notion_with};
use notion_mdast_markdown::{Processor, notion_extension};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Json,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "notion-mdast")]
#[command(about = "Convert a Notion block children response into mdast or markdown")]
struct Cli {
    /// Notion API response JSON; `-` reads stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Reject block trees nested deeper than this
    #[arg(long)]
    max_depth: Option<usize>,

    /// Write JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Write to-do items as plain list items in markdown output
    #[arg(long)]
    no_task_lists: bool,

    /// Config file (defaults to ~/.config/notion-mdast/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

/// Effective settings after applying command-line overrides to the config.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    format: OutputFormat,
    max_depth: Option<usize>,
    task_lists: bool,
    pretty: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: Config) -> Self {
        Self {
            format: cli.format.map(OutputFormat::from).unwrap_or(config.format),
            max_depth: cli.max_depth.or(config.max_depth),
            task_lists: config.task_lists && !cli.no_task_lists,
            pretty: config.pretty && !cli.compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, config);
    log::debug!("effective settings: {settings:?}");

    let input = read_input(&cli.input)?;
    let output = convert(&input, &settings)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => io::stdout().write_all(output.as_bytes())?,
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => Some(config),
            None => bail!("Config file not found: {}", path.display()),
        },
        None => Config::load()?,
    };
    Ok(loaded.unwrap_or_default())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Validates and transforms one JSON response, rendering it in the requested format.
fn convert(input: &str, settings: &Settings) -> Result<String> {
    let raw: serde_json::Value = serde_json::from_str(input).context("Input is not valid JSON")?;
    let options = ValidationOptions {
        max_depth: settings.max_depth,
    };
    let root = parse_notion_with(&raw, &options)?;
    log::debug!("transformed {} top-level nodes", root.children.len());

    let mut out = match settings.format {
        OutputFormat::Json if settings.pretty => serde_json::to_string_pretty(&root)?,
        OutputFormat::Json => serde_json::to_string(&root)?,
        OutputFormat::Markdown => {
            let mut extension = notion_extension();
            extension.to_markdown.task_list_items = settings.task_lists;
            return Ok(Processor::new(&[extension]).stringify(&root));
        }
    };
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const TASKS: &str = r#"{
        "object": "list",
        "type": "block",
        "block": {},
        "next_cursor": null,
        "has_more": false,
        "results": [{
            "object": "block",
            "id": "9bc30ad4-9373-46a5-84ab-0a7845ee52e6",
            "parent": { "type": "workspace", "workspace": true },
            "created_time": "2023-01-01T00:00:00.000Z",
            "created_by": { "object": "user", "id": "1f0b3b5c-4b4e-4b7a-9a0c-6e2f5f8d9a11" },
            "last_edited_time": "2023-01-01T00:00:00.000Z",
            "last_edited_by": { "object": "user", "id": "1f0b3b5c-4b4e-4b7a-9a0c-6e2f5f8d9a11" },
            "has_children": false,
            "archived": false,
            "type": "to_do",
            "to_do": {
                "rich_text": [{
                    "type": "text",
                    "text": { "content": "Ship it", "link": null },
                    "annotations": {
                        "bold": false, "italic": false, "strikethrough": false,
                        "underline": false, "code": false, "color": "default"
                    },
                    "plain_text": "Ship it",
                    "href": null
                }],
                "checked": true,
                "color": "default"
            }
        }]
    }"#;

    fn settings(format: OutputFormat) -> Settings {
        Settings {
            format,
            max_depth: None,
            task_lists: true,
            pretty: false,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "notion-mdast",
            "page.json",
            "--format",
            "markdown",
            "--max-depth",
            "3",
            "--compact",
            "--no-task-lists",
        ]);
        let config = Config {
            format: OutputFormat::Json,
            max_depth: Some(10),
            task_lists: true,
            pretty: true,
        };

        let resolved = Settings::resolve(&cli, config);

        assert_eq!(cli.input, PathBuf::from("page.json"));
        assert_eq!(
            resolved,
            Settings {
                format: OutputFormat::Markdown,
                max_depth: Some(3),
                task_lists: false,
                pretty: false,
            }
        );
    }

    #[test]
    fn test_config_applies_without_flags() {
        let cli = Cli::parse_from(["notion-mdast"]);
        let config = Config {
            format: OutputFormat::Markdown,
            max_depth: Some(5),
            task_lists: false,
            pretty: true,
        };

        let resolved = Settings::resolve(&cli, config);

        assert_eq!(cli.input, PathBuf::from("-"));
        assert_eq!(resolved.format, OutputFormat::Markdown);
        assert_eq!(resolved.max_depth, Some(5));
        assert!(!resolved.task_lists);
        assert!(resolved.pretty);
    }

    #[test]
    fn test_convert_to_compact_json() {
        let out = convert(TASKS, &settings(OutputFormat::Json)).unwrap();
        assert_eq!(
            out,
            concat!(
                r#"{"type":"root","children":[{"type":"list","ordered":false,"children":"#,
                r#"[{"type":"listItem","checked":true,"children":[{"type":"paragraph","#,
                r#""children":[{"type":"text","value":"Ship it"}]}]}]}]}"#,
                "\n"
            )
        );
    }

    #[test]
    fn test_convert_to_markdown() {
        let out = convert(TASKS, &settings(OutputFormat::Markdown)).unwrap();
        assert_eq!(out, "- [x] Ship it\n");

        let plain = Settings {
            task_lists: false,
            ..settings(OutputFormat::Markdown)
        };
        assert_eq!(convert(TASKS, &plain).unwrap(), "- Ship it\n");
    }

    #[test]
    fn test_invalid_payload_is_an_error() {
        let err = convert(r#"{"object": "list"}"#, &settings(OutputFormat::Json)).unwrap_err();
        assert!(err.to_string().starts_with("Invalid data: "));

        let err = convert("not json", &settings(OutputFormat::Json)).unwrap_err();
        assert_eq!(err.to_string(), "Input is not valid JSON");
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        assert!(load_config(Some(missing.as_path())).is_err());
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "format = \"markdown\"\npretty = false\n").unwrap();

        let config = load_config(Some(path.as_path())).unwrap();

        assert_eq!(config.format, OutputFormat::Markdown);
        assert!(!config.pretty);
        assert!(config.task_lists);
    }
}
