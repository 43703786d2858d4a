//! # Report モジュール
//!
//! シミュレーション結果を消費する報告系の機能を提供します。
//!
//! 報告系はエンジンから完全に分離された外部コラボレータであり、
//! `SimulationResult` の値のみを入力とします。エンジン側はこの
//! モジュールに依存せず、テスト時は報告系なしでヘッドレス実行できます。

use crate::simulation::SimulationResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 結果概要をコンソールに表示
pub fn print_result_summary(result: &SimulationResult) {
    println!();
    println!("=== シミュレーション結果 ===");

    if result.intercepted {
        println!("結果: 迎撃成功");
        if let Some(t) = result.intercept_time_s {
            println!("迎撃時刻: {:.1}秒", t);
        }
    } else {
        println!("結果: 迎撃失敗（時間または燃料の枯渇）");
    }

    println!("終了時距離: {:.1}m", result.final_range_m);
    println!("記録サンプル数: {}", result.trajectory.len());

    if let Some(last) = result.trajectory.last() {
        println!("最終記録時刻: {:.1}秒", last.time_s);
        println!("最終記録速さ: {:.1}m/s", last.interceptor_speed_mps);
    }
}

/// 軌跡をCSVファイルに出力
///
/// ヘッダー行に単位付きの列名を書き、1ティック1行で軌跡を出力します。
pub fn export_trajectory_csv<P: AsRef<Path>>(
    path: P,
    result: &SimulationResult,
) -> Result<(), std::io::Error> {
    let output_file = File::create(path)?;
    let mut writer = BufWriter::new(output_file);

    write_trajectory_csv(&mut writer, result)?;
    writer.flush()
}

/// 軌跡CSVの書き込み本体（出力先を差し替え可能）
pub fn write_trajectory_csv<W: Write>(
    writer: &mut W,
    result: &SimulationResult,
) -> Result<(), std::io::Error> {
    writer.write_all(
        b"time(s),int_x(m),int_y(m),int_z(m),tgt_x(m),tgt_y(m),tgt_z(m),range(m),int_speed(m/s)\n",
    )?;

    for sample in &result.trajectory {
        let row = format!(
            "{},{},{},{},{},{},{},{},{}\n",
            sample.time_s,
            sample.interceptor_position.x,
            sample.interceptor_position.y,
            sample.interceptor_position.z,
            sample.target_position.x,
            sample.target_position.y,
            sample.target_position.z,
            sample.range_m,
            sample.interceptor_speed_mps,
        );
        writer.write_all(row.as_bytes())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vector3;
    use crate::simulation::TrajectorySample;

    fn sample_result() -> SimulationResult {
        SimulationResult {
            intercepted: true,
            intercept_time_s: Some(0.2),
            final_range_m: 5.0,
            trajectory: vec![
                TrajectorySample {
                    time_s: 0.0,
                    interceptor_position: Vector3::new(0.0, 0.0, 1000.0),
                    target_position: Vector3::new(100.0, 0.0, 500.0),
                    range_m: 502.5,
                    interceptor_speed_mps: 111.0,
                },
                TrajectorySample {
                    time_s: 0.1,
                    interceptor_position: Vector3::new(11.1, 0.0, 1000.0),
                    target_position: Vector3::new(94.9, 0.0, 500.0),
                    range_m: 501.0,
                    interceptor_speed_mps: 112.0,
                },
            ],
        }
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_sample() {
        let result = sample_result();
        let mut buffer = Vec::new();
        write_trajectory_csv(&mut buffer, &result).expect("write failed");

        let text = String::from_utf8(buffer).expect("invalid utf-8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3); // ヘッダー + サンプル2件
        assert!(lines[0].starts_with("time(s),int_x(m)"));
        assert!(lines[0].ends_with("int_speed(m/s)"));
        assert!(lines[1].starts_with("0,"));
        assert!(lines[2].starts_with("0.1,"));
    }

    #[test]
    fn test_csv_empty_trajectory_writes_header_only() {
        let result = SimulationResult {
            intercepted: true,
            intercept_time_s: Some(0.0),
            final_range_m: 0.0,
            trajectory: Vec::new(),
        };
        let mut buffer = Vec::new();
        write_trajectory_csv(&mut buffer, &result).expect("write failed");

        let text = String::from_utf8(buffer).expect("invalid utf-8");
        assert_eq!(text.lines().count(), 1);
    }
}
