//! 部分局面による棋譜検索 CLI
//!
//! # 使用例
//!
//! ```bash
//! # 7六に先手の歩、2二に後手の角がある棋譜を検索
//! cargo run -p kifsearch-client --bin kifsearch -- search --place 76:P --place 22:b
//!
//! # 棋譜ファイルの15手目の局面で検索
//! cargo run -p kifsearch-client --bin kifsearch -- from-kif game.kif --ply 15 --search
//!
//! # 棋譜をビューア枠 02 に書き出す
//! cargo run -p kifsearch-client --bin kifsearch -- view --slot 02 game.kif
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kifsearch_client::{ClientConfig, HtmlFileSink, HttpSearchClient};
use kifsearch_core::board::BoardSession;
use kifsearch_core::condition::{conditions_to_json, conditions_to_placement, parse_conditions_json};
use kifsearch_core::kif::{KifIngest, KifRecord, ViewerSlot, read_kif_file};
use kifsearch_core::{SearchCondition, SearchController, SearchReport};
use log::{info, warn};

#[derive(Parser)]
#[command(name = "kifsearch", version, about = "部分局面で棋譜を検索する")]
struct Cli {
    /// 設定ファイル（TOML）
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// 検索 API の URL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// リクエストのタイムアウト秒数（0 でタイムアウトなし）
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// 駒配置を指定して検索
    Search {
        /// 条件 "XY:CODE"（筋段＋駒コード。例: 76:P）。複数指定可
        #[arg(long = "place")]
        places: Vec<String>,
        /// 条件の JSON ファイル（リクエストボディと同じ形式）
        #[arg(long)]
        conditions: Option<PathBuf>,
        /// 結果を JSON で出力
        #[arg(long)]
        json: bool,
        /// 結果を HTML 断片で出力
        #[arg(long, conflicts_with = "json")]
        html: bool,
    },
    /// 棋譜ファイルの局面から検索条件を作る
    FromKif {
        file: PathBuf,
        /// 何手目の局面を使うか（省略時は最終手）
        #[arg(long)]
        ply: Option<u32>,
        /// 作った条件でそのまま検索する
        #[arg(long)]
        search: bool,
        /// JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// 棋譜をビューア HTML に書き出す
    View {
        /// ビューア枠（01, 02, 03）
        #[arg(long)]
        slot: ViewerSlot,
        file: PathBuf,
        /// 出力ディレクトリ（省略時は設定の viewer_out_dir）
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// 棋譜ヘッダと結果を表示
    Header { file: PathBuf },
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.cmd {
        Cmd::Search {
            places,
            conditions,
            json,
            html,
        } => {
            let conditions = collect_conditions(&places, conditions.as_deref())?;
            let format = if json {
                OutputFormat::Json
            } else if html {
                OutputFormat::Html
            } else {
                OutputFormat::Text
            };
            run_search(&config, &conditions, format)
        }
        Cmd::FromKif {
            file,
            ply,
            search,
            json,
        } => run_from_kif(&config, &file, ply, search, json),
        Cmd::View {
            slot,
            file,
            out_dir,
        } => run_view(&config, slot, &file, out_dir),
        Cmd::Header { file } => run_header(&file),
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(cli.config.as_deref()).context("load config")?;
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout_secs = Some(secs);
    }
    Ok(config)
}

fn collect_conditions(places: &[String], file: Option<&Path>) -> Result<Vec<SearchCondition>> {
    let mut conditions = Vec::new();
    if let Some(path) = file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read conditions: {}", path.display()))?;
        conditions.extend(
            parse_conditions_json(&text)
                .with_context(|| format!("parse conditions: {}", path.display()))?,
        );
    }
    for place in places {
        conditions.push(place.parse::<SearchCondition>()?);
    }
    Ok(conditions)
}

fn run_search(
    config: &ClientConfig,
    conditions: &[SearchCondition],
    format: OutputFormat,
) -> Result<()> {
    let client = HttpSearchClient::new(config).context("create search client")?;
    // 同じマスの指定は後勝ち
    let session = BoardSession::with_placement(conditions_to_placement(conditions));
    let mut controller = SearchController::with_session(client, session);

    let report = controller
        .run_search()
        .with_context(|| format!("search {}", config.endpoint))?;
    print_report(report, format)
}

fn print_report(report: &SearchReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Html => print!("{}", report.render_html()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn run_from_kif(
    config: &ClientConfig,
    file: &Path,
    ply: Option<u32>,
    search: bool,
    json: bool,
) -> Result<()> {
    let decoded = read_kif_file(file)?;
    info!("{}: {}", file.display(), decoded.encoding.name());
    let record = KifRecord::parse(&decoded.text);
    if !record.header.is_even_game() {
        warn!("手合割が平手ではありません。平手の初期局面から再生します");
    }

    let board = record
        .board_at(ply)
        .with_context(|| format!("replay {}", file.display()))?;
    let conditions = board.conditions();
    eprintln!(
        "{} ({}手中 {}手目の局面): {}件の条件",
        file.display(),
        record.move_count(),
        ply.map_or_else(|| record.move_count().to_string(), |p| p.to_string()),
        conditions.len()
    );

    if search {
        let format = if json { OutputFormat::Json } else { OutputFormat::Text };
        return run_search(config, &conditions, format);
    }

    let items = conditions_to_json(&conditions);
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for (cond, item) in conditions.iter().zip(&items) {
            println!(
                "{}:{}  {} {}{}",
                cond.square,
                item.sfen,
                cond.square.kanji_label(),
                cond.code.color.mark(),
                cond.code.kanji()
            );
        }
    }
    Ok(())
}

fn run_view(
    config: &ClientConfig,
    slot: ViewerSlot,
    file: &Path,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let mut sink = HtmlFileSink::new(out_dir.unwrap_or_else(|| config.viewer_out_dir.clone()));
    KifIngest::ingest(slot, &bytes, &mut sink)
        .with_context(|| format!("load {} into slot {slot}", file.display()))?;
    println!("{}", sink.path_for(slot).display());
    Ok(())
}

fn run_header(file: &Path) -> Result<()> {
    let decoded = read_kif_file(file)?;
    let record = KifRecord::parse(&decoded.text);
    let header = &record.header;
    let or_dash = |v: Option<&str>| v.unwrap_or("-").to_string();

    println!("文字コード: {}", decoded.encoding.name());
    println!("先手: {}", header.sente_player);
    println!("後手: {}", header.gote_player);
    println!("手合割: {}", or_dash(header.handicap.as_deref()));
    println!("開始日時: {}", or_dash(header.started_at.as_deref()));
    println!("終了日時: {}", or_dash(header.ended_at.as_deref()));
    println!("手数: {}", record.move_count());
    println!("結果: {}", header.outcome.map_or("-", |o| o.label()));
    Ok(())
}
