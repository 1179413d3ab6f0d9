use std::path::PathBuf;

use clap::Parser;

use crate::game::ScreenConfig;
use crate::scores::HighScore;

#[derive(Parser, Debug)]
#[command(name = "invaders")]
#[command(about = "Space invaders in the terminal")]
pub struct Cli {
    /// Screen width in game pixels
    #[arg(long, default_value_t = 750)]
    pub width: i32,

    /// Screen height in game pixels
    #[arg(long, default_value_t = 700)]
    pub height: i32,

    /// Margin around the play field in game pixels
    #[arg(long, default_value_t = 50)]
    pub offset: i32,

    /// Highscore file (defaults to highscore.txt next to the executable)
    #[arg(long)]
    pub highscore_file: Option<PathBuf>,

    /// Seed for alien fire and mystery ship rolls
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output goes; the terminal is taken by the game
    #[arg(long, default_value = "invaders.log")]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn screen(&self) -> ScreenConfig {
        ScreenConfig {
            screen_width: self.width,
            screen_height: self.height,
            offset: self.offset,
        }
    }

    pub fn highscore_path(&self) -> PathBuf {
        self.highscore_file
            .clone()
            .unwrap_or_else(HighScore::default_path)
    }
}
