use anyhow::Result;
use clap::Parser;
use std::{fs, path::Path};

/// Show a Steam user's "year in review" playtime as a bar chart.
#[derive(Parser, Debug)]
pub struct Args {
    /// Steam Web API key, or a path to a file containing it.
    /// A key can be created at https://steamcommunity.com/dev/apikey
    #[arg(short, long, required = true)]
    pub api_key: String,

    /// SteamID64 of the user.
    #[arg(short, long, required = true)]
    pub steam_id: String,

    /// Year of the review, e.g. 2024.
    #[arg(short, long, default_value_t = 2024)]
    pub year: u32,

    #[arg(long, default_value = "https://api.steampowered.com")]
    pub base_url: String,

    /// Draw the bars without color.
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn parse_secret(input: &str) -> Result<String> {
        if Path::new(input).is_file() {
            Ok(fs::read_to_string(input)?.trim().to_string())
        } else {
            Ok(input.to_string())
        }
    }
}
