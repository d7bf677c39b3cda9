use std::{ffi::OsString, path::PathBuf, str::FromStr};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use boar_compose::{
    assets::color::parse_color,
    compose::{
        announce::{AnnounceJob, AnnounceText},
        base::BaseJob,
        collection::CollectionJob,
        overlay::{Gifter, ScoreOverlayJob, UserOverlayJob},
        parse_flag, render_gif,
    },
    config::{
        item::{ColorTable, ItemConfig, ItemPreset, NumberConfig, PathConfig, ProfileBoxConfig},
        legacy::LegacyConfig,
        parse_json_arg,
    },
    encode::gif::to_base64,
    verify::verify_file,
};

/// Env var selecting the stderr log level.
const LOG_ENV: &str = "BOAR_COMPOSE_LOG";
/// Config document read from the working directory.
const CONFIG_FILE: &str = "config.json";

#[derive(Parser, Debug)]
#[command(name = "boar-compose", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Badge/boar announcement at full layout, downscaled by 3.
    Announce(AnnounceArgs),
    /// Badge/boar announcement from ./config.json at half scale.
    AnnounceHalf(AnnounceHalfArgs),
    /// Collection card with title and rarity-colored name.
    Collection(CollectionArgs),
    /// Item frames pasted onto a pre-rendered base image.
    Base(BaseArgs),
    /// Nameplate, avatar and tag over an item image.
    UserOverlay(UserOverlayArgs),
    /// User boxes, gift boxes and score badge over an item image.
    ScoreOverlay(ScoreOverlayArgs),
    /// Check ./config.json for broken IDs and paths.
    VerifyConfig,
}

#[derive(Parser, Debug)]
struct AnnounceArgs {
    /// `{pathConfig, colorConfig, numberConfig}` JSON.
    config: String,
    /// Key into `colorConfig` for the background fill.
    color_key: String,
    main_image: PathBuf,
    avatar_url: String,
    #[arg(allow_hyphen_values = true)]
    user_tag: OsString,
    #[arg(allow_hyphen_values = true)]
    title: OsString,
    #[arg(allow_hyphen_values = true)]
    name: OsString,
    /// Truthy for the boar content preset, else badge.
    is_boar: String,
}

#[derive(Parser, Debug)]
struct AnnounceHalfArgs {
    /// Background fill color (`#RRGGBB`).
    hex_color: String,
    main_image: PathBuf,
    avatar_url: String,
    #[arg(allow_hyphen_values = true)]
    user_tag: OsString,
    #[arg(allow_hyphen_values = true)]
    title: OsString,
    #[arg(allow_hyphen_values = true)]
    name: OsString,
    is_boar: String,
}

#[derive(Parser, Debug)]
struct CollectionArgs {
    path_config: String,
    color_config: String,
    number_config: String,
    color_key: String,
    main_image: PathBuf,
    #[arg(allow_hyphen_values = true)]
    title: OsString,
    #[arg(allow_hyphen_values = true)]
    name: OsString,
    /// Exactly `true` selects the badge preset.
    is_badge: String,
}

#[derive(Parser, Debug)]
struct BaseArgs {
    path_config: String,
    number_config: String,
    item_image: PathBuf,
    base_image: PathBuf,
}

#[derive(Parser, Debug)]
struct UserOverlayArgs {
    config: String,
    image: PathBuf,
    avatar_url: String,
    #[arg(allow_hyphen_values = true)]
    user_tag: OsString,
}

#[derive(Parser, Debug)]
struct ScoreOverlayArgs {
    path_config: String,
    color_config: String,
    number_config: String,
    image: PathBuf,
    avatar_url: String,
    #[arg(allow_hyphen_values = true)]
    user_tag: OsString,
    /// Empty for no score badge.
    #[arg(allow_hyphen_values = true)]
    score: String,
    /// Empty when the item was not gifted.
    #[arg(default_value = "")]
    gift_avatar_url: String,
    #[arg(default_value = "", allow_hyphen_values = true)]
    gift_user_tag: OsString,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Announce(args) => emit(cmd_announce(args)?),
        Command::AnnounceHalf(args) => emit(cmd_announce_half(args)?),
        Command::Collection(args) => emit(cmd_collection(args)?),
        Command::Base(args) => emit(cmd_base(args)?),
        Command::UserOverlay(args) => emit(cmd_user_overlay(args)?),
        Command::ScoreOverlay(args) => emit(cmd_score_overlay(args)?),
        Command::VerifyConfig => cmd_verify(),
    }
}

fn init_logging() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
        .unwrap_or(LevelFilter::WARN);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn emit(gif: Vec<u8>) -> anyhow::Result<()> {
    println!("{}", to_base64(&gif));
    Ok(())
}

fn lossy(s: &OsString) -> String {
    s.to_string_lossy().into_owned()
}

fn cmd_announce(args: AnnounceArgs) -> anyhow::Result<Vec<u8>> {
    let cfg: ItemConfig = parse_json_arg("config", &args.config)?;
    let preset = if parse_flag(&args.is_boar) {
        ItemPreset::Boar
    } else {
        ItemPreset::Badge
    };
    let text = AnnounceText {
        title: lossy(&args.title),
        name: lossy(&args.name),
        user_tag: lossy(&args.user_tag),
    };
    let job = AnnounceJob::third_scale(&cfg, &args.color_key, preset, &args.avatar_url, text)?;
    Ok(render_gif(&job.plan()?, &args.main_image)?)
}

fn cmd_announce_half(args: AnnounceHalfArgs) -> anyhow::Result<Vec<u8>> {
    let cfg = read_legacy_config()?;
    let preset = if parse_flag(&args.is_boar) {
        ItemPreset::Boar
    } else {
        ItemPreset::Badge
    };
    let text = AnnounceText {
        title: lossy(&args.title),
        name: lossy(&args.name),
        user_tag: lossy(&args.user_tag),
    };
    let background = parse_color(&args.hex_color)?;
    let job = AnnounceJob::half_scale(&cfg, background, preset, &args.avatar_url, text)?;
    Ok(render_gif(&job.plan()?, &args.main_image)?)
}

fn cmd_collection(args: CollectionArgs) -> anyhow::Result<Vec<u8>> {
    let paths: PathConfig = parse_json_arg("path config", &args.path_config)?;
    let colors: ColorTable = parse_json_arg("color config", &args.color_config)?;
    let nums: NumberConfig = parse_json_arg("number config", &args.number_config)?;
    let preset = if args.is_badge == "true" {
        ItemPreset::Badge
    } else {
        ItemPreset::Boar
    };
    let job = CollectionJob::resolve(
        &paths,
        &colors,
        &nums,
        &args.color_key,
        preset,
        &lossy(&args.title),
        &lossy(&args.name),
    )?;
    Ok(render_gif(&job.plan()?, &args.main_image)?)
}

fn cmd_base(args: BaseArgs) -> anyhow::Result<Vec<u8>> {
    // Only validated: every asset this variant reads is passed explicitly.
    let _: PathConfig = parse_json_arg("path config", &args.path_config)?;
    let nums: NumberConfig = parse_json_arg("number config", &args.number_config)?;
    let job = BaseJob::resolve(&nums, args.base_image)?;
    Ok(render_gif(&job.plan()?, &args.item_image)?)
}

fn cmd_user_overlay(args: UserOverlayArgs) -> anyhow::Result<Vec<u8>> {
    let cfg: ItemConfig = parse_json_arg("config", &args.config)?;
    let job = UserOverlayJob::resolve(&cfg, &args.avatar_url, &lossy(&args.user_tag))?;
    Ok(render_gif(&job.plan()?, &args.image)?)
}

fn cmd_score_overlay(args: ScoreOverlayArgs) -> anyhow::Result<Vec<u8>> {
    let paths: PathConfig = parse_json_arg("path config", &args.path_config)?;
    let colors: ColorTable = parse_json_arg("color config", &args.color_config)?;
    let nums: NumberConfig = parse_json_arg("number config", &args.number_config)?;
    let boxes: ProfileBoxConfig = parse_json_arg("number config", &args.number_config)?;
    let gifter = Gifter::from_args(&args.gift_avatar_url, &lossy(&args.gift_user_tag));
    let job = ScoreOverlayJob::resolve(
        &paths,
        &colors,
        &nums,
        &boxes,
        &args.avatar_url,
        &lossy(&args.user_tag),
        &args.score,
        gifter,
    )?;
    Ok(render_gif(&job.plan()?, &args.image)?)
}

fn read_legacy_config() -> anyhow::Result<LegacyConfig> {
    let raw = std::fs::read_to_string(CONFIG_FILE)
        .with_context(|| format!("read '{CONFIG_FILE}' from the working directory"))?;
    serde_json::from_str(&raw).with_context(|| format!("parse '{CONFIG_FILE}'"))
}

fn cmd_verify() -> anyhow::Result<()> {
    for diag in verify_file(std::path::Path::new(CONFIG_FILE))? {
        println!("{diag}");
    }
    Ok(())
}
