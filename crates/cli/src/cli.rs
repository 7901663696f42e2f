//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use boncode_core::clean::clean;
use clap::{Parser, Subcommand};

use crate::commands::{
    BuildArgs, ExtractArgs, InstanceArgs, MergeArgs, build, extract_korean, instance, merge,
};

#[derive(Parser)]
#[command(name = "boncode-fonts")]
#[command(about = "Build Bon Code hybrid Korean and Latin monospace fonts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every configured family, or the ones named with --family.
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },
    /// Extract and normalize the Korean subset of one font.
    ExtractKorean {
        #[command(flatten)]
        args: ExtractArgs,
    },
    /// Merge a Korean subset into a Latin font and reconcile its metadata.
    Merge {
        #[command(flatten)]
        args: MergeArgs,
    },
    /// Create a static instance of a variable font at a named weight.
    Instance {
        #[command(flatten)]
        args: InstanceArgs,
    },
    /// Remove the build and output directories.
    Clean {
        #[arg(long, default_value = ".build")]
        build_dir: PathBuf,
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { args } => build(args)?,
            Commands::ExtractKorean { args } => extract_korean(args)?,
            Commands::Merge { args } => merge(args)?,
            Commands::Instance { args } => instance(args)?,
            Commands::Clean { build_dir, out_dir } => {
                clean(&build_dir, &out_dir)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_command_has_help() {
        let cli = Cli::command();
        for command in cli.get_subcommands() {
            assert!(command.get_about().is_some(), "{} has no help text", command.get_name());
        }
    }

    #[test]
    fn test_build_family_is_repeatable() {
        let cli = Cli::parse_from([
            "boncode-fonts",
            "build",
            "--family",
            "JetBrainsMono",
            "--family",
            "GoogleSansCode",
            "--version",
            "2025-01-15",
        ]);
        let Commands::Build { args } = cli.command else { panic!("expected build") };
        assert_eq!(args.family, ["JetBrainsMono", "GoogleSansCode"]);
        assert_eq!(args.version.as_deref(), Some("2025-01-15"));
        assert_eq!(args.config, PathBuf::from("config/base-config.json"));
        assert_eq!(args.out_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_instance_italic_flag() {
        let cli = Cli::parse_from([
            "boncode-fonts",
            "instance",
            "--input",
            "Var[wght].ttf",
            "--output",
            "Var-Bold.ttf",
            "--weight",
            "Bold",
            "--italic",
        ]);
        let Commands::Instance { args } = cli.command else { panic!("expected instance") };
        assert!(args.italic);
        assert_eq!(args.weight, "Bold");
    }
}
