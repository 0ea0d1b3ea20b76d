use crate::config::EngineConfig;
use crate::demos::DEMO_NAMES;
use crate::display::EdgePolicy;
use clap::builder::PossibleValuesParser;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "rasterbox")]
#[command(about = "Software rasterizer demos", long_about = None)]
pub struct Cli {
    /// Program to run
    #[arg(long, default_value = "showcase", value_parser = PossibleValuesParser::new(DEMO_NAMES))]
    pub demo: String,

    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logical width, defaults to the demo's own size
    #[arg(long, short = 'W')]
    pub width: Option<u32>,

    /// Logical height, defaults to the demo's own size
    #[arg(long, short = 'H')]
    pub height: Option<u32>,

    /// Start in borderless fullscreen
    #[arg(long)]
    pub fullscreen: bool,

    /// Never write row 0 or column 0
    #[arg(long = "legacy-edges")]
    pub legacy_edges: bool,

    /// Uncapped frame rate
    #[arg(long = "no-vsync")]
    pub no_vsync: bool,
}

impl Cli {
    /// Fold the flags over settings loaded from a file or defaults
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.fullscreen {
            config.start_fullscreen = true;
        }
        if self.legacy_edges {
            config.edge_policy = EdgePolicy::SkipOrigin;
        }
        if self.no_vsync {
            config.vsync = false;
        }
        config
    }
}
