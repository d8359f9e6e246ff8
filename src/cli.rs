use clap::{Parser, Subcommand};

use crate::prompt::Language;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output language for recipes and ingredient names
    #[arg(short, long, default_value = "en", global = true)]
    pub language: Language,

    /// Path to the favorites file
    #[arg(long, default_value = "favorites.json", global = true)]
    pub favorites_file: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate three healthy recipes (with images) from a list of ingredients
    Generate {
        /// Ingredient names; omit to use a random starter trio
        ingredients: Vec<String>,
    },
    /// Identify ingredients in a photo (JPEG or PNG file)
    Scan {
        /// Path to the image file
        image_file: String,
    },
    /// Print a random starter trio of ingredients
    Suggest,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
