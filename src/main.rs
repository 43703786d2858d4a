mod logging;
mod models;
mod report;
mod scenario;
mod simulation;

use clap::{Arg, Command};
use logging::{LogConfig, LogOutput, init_logging, parse_log_level};
use scenario::ScenarioConfig;
use simulation::SimulationEngine;
use std::str::FromStr;
use tracing::Level;

fn main() {
    // コマンドライン引数の解析
    let matches = Command::new("intsim")
        .version("0.1.0")
        .about("迎撃シミュレーション (Interception Simulation)")
        .long_about(
            "比例航法誘導による迎撃シミュレーション\n\
             固定時間刻みの運動学シミュレーションで、移動ターゲットに対する\n\
             インターセプタの迎撃可否を評価します。",
        )
        .arg(
            Arg::new("scenario")
                .short('s')
                .long("scenario")
                .value_name("FILE")
                .help("シナリオファイル(.yaml)のパスを指定")
                .long_help(
                    "実行するシナリオファイル(.yaml)のパスを指定します。\n\
                     指定しない場合、使用方法とシナリオ一覧を表示します。",
                ),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .action(clap::ArgAction::SetTrue)
                .help("シナリオの情報のみ表示して終了")
                .conflicts_with("test"),
        )
        .arg(
            Arg::new("test")
                .short('t')
                .long("test")
                .action(clap::ArgAction::SetTrue)
                .help("組み込みの正面迎撃シナリオを実行")
                .conflicts_with("info"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("軌跡CSVの出力先を指定（シナリオ設定より優先）"),
        )
        .arg(
            Arg::new("log-output")
                .long("log-output")
                .value_name("DEST")
                .help("ログ出力先 (console, file, both)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("ログレベル (trace, debug, info, warn, error)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::Count)
                .help("詳細出力レベル (-v: 基本, -vv: 詳細, -vvv: デバッグ)"),
        )
        .get_matches();

    println!("迎撃シミュレーション (Interception Simulation) - intsim v0.1.0");
    println!();

    let verbose_level = matches.get_count("verbose");

    // ログシステムの初期化
    let log_output = matches
        .get_one::<String>("log-output")
        .map(|s| match LogOutput::from_str(s) {
            Ok(output) => output,
            Err(e) => {
                eprintln!("エラー: {}", e);
                std::process::exit(1);
            }
        })
        .unwrap_or(LogOutput::Console);

    // --log-level指定が最優先、なければ-vの段数から決定
    let log_level = match matches.get_one::<String>("log-level") {
        Some(level_str) => parse_log_level(level_str),
        None => match verbose_level {
            0 | 1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        },
    };

    let log_config = LogConfig {
        level: log_level,
        output: log_output,
        ..LogConfig::default()
    };

    if let Err(e) = init_logging(log_config) {
        eprintln!("エラー: ログ初期化に失敗しました: {}", e);
        std::process::exit(1);
    }

    let csv_override = matches.get_one::<String>("output").cloned();

    // 組み込みテストシナリオの実行
    if matches.get_flag("test") {
        println!("=== 組み込みシナリオモード ===");
        let config = ScenarioConfig::head_on_test();
        if let Err(e) = execute_scenario(config, verbose_level, csv_override) {
            eprintln!("エラー: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // シナリオファイルの処理
    if let Some(scenario_path) = matches.get_one::<String>("scenario") {
        match run_scenario(
            scenario_path,
            matches.get_flag("info"),
            verbose_level,
            csv_override,
        ) {
            Ok(_) => {
                if verbose_level > 0 {
                    println!("シナリオ実行が正常に完了しました。");
                }
            }
            Err(e) => {
                eprintln!("エラー: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        // デフォルト動作: 使用方法とシナリオ一覧を表示
        show_default_help();
    }
}

/// シナリオファイルを読み込んで実行
fn run_scenario(
    scenario_path: &str,
    info_only: bool,
    verbose_level: u8,
    csv_override: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    // シナリオファイルの読み込み（検証込み、エラー時は実行しない）
    let config = ScenarioConfig::from_file(scenario_path)?;

    if verbose_level > 0 {
        println!("シナリオファイル読み込み完了: {}", scenario_path);
    }

    // 情報表示のみの場合
    if info_only {
        config.print_summary();
        return Ok(());
    }

    execute_scenario(config, verbose_level, csv_override)?;

    Ok(())
}

/// シナリオの実行
fn execute_scenario(
    config: ScenarioConfig,
    verbose_level: u8,
    csv_override: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    // 基本情報表示
    config.print_summary();
    println!();

    // CSV出力先の決定（コマンドライン指定がシナリオ設定より優先）
    let csv_path = csv_override.or_else(|| {
        config
            .output
            .as_ref()
            .and_then(|o| o.trajectory_csv.clone())
    });

    // シミュレーション実行
    let mut engine = SimulationEngine::new(&config, verbose_level);
    let result = engine.run();

    // 報告系は結果値のみを消費する
    report::print_result_summary(&result);

    if let Some(path) = csv_path {
        if let Some(parent) = std::path::Path::new(&path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        report::export_trajectory_csv(&path, &result)?;
        println!("軌跡CSVを出力しました: {}", path);
    }

    Ok(())
}

/// デフォルトヘルプとシナリオ一覧を表示
fn show_default_help() {
    println!("使用方法:");
    println!("  intsim [オプション]");
    println!();
    println!("オプション:");
    println!("  -s, --scenario <FILE>  シナリオファイルを指定して実行");
    println!("  -i, --info             シナリオ情報のみ表示");
    println!("  -t, --test             組み込みの正面迎撃シナリオを実行");
    println!("  -o, --output <FILE>    軌跡CSVの出力先を指定");
    println!("      --log-output <DEST> ログ出力先 (console, file, both)");
    println!("      --log-level <LEVEL> ログレベル (trace, debug, info, warn, error)");
    println!("  -v, --verbose          詳細出力 (複数指定で詳細レベル上昇)");
    println!("  -h, --help             このヘルプを表示");
    println!();
    println!("利用可能なシナリオファイル:");
    println!("  scenarios/scenario_head_on.yaml    - 正面接近ターゲットの迎撃");
    println!("  scenarios/scenario_diverging.yaml  - 離脱ターゲット（燃料切れ想定）");
    println!();
    println!("例:");
    println!("  intsim -s scenarios/scenario_head_on.yaml");
    println!("  intsim -s scenarios/scenario_diverging.yaml -v");
    println!("  intsim -s scenarios/scenario_head_on.yaml -i");
    println!("  intsim --test -o output/trajectory.csv");
}
