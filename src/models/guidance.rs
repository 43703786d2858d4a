use crate::models::common::{Kinematics, Vector3};

/// 誘導則の較正定数
///
/// 比例航法ゲインN、終末フェーズ切替距離、横方向補正のスケール係数を
/// 保持します。すべてシナリオ設定から与えられる固定値です。
#[derive(Debug, Clone, Copy)]
pub struct GuidanceParams {
    /// 比例航法ゲイン（無次元、通常3-5）
    pub n: f64,
    /// 終末フェーズ切替距離（m）
    pub terminal_range_m: f64,
    /// 横方向補正のスケール係数（誘導則出力を速度増分に変換）
    pub lateral_scale: f64,
}

impl Default for GuidanceParams {
    fn default() -> Self {
        Self {
            n: 4.0,
            terminal_range_m: 100.0,
            lateral_scale: 0.1,
        }
    }
}

/// 誘導フェーズ
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuidancePhase {
    /// 中間段階（簡易比例航法による横方向補正）
    Midcourse,
    /// 終末段階（ターゲット現在位置への直接追尾）
    Terminal,
}

/// 誘導計算の結果
///
/// このティックで指令される速度ベクトルと、使用した誘導フェーズ、
/// 計算時点の距離を返します。
#[derive(Debug, Clone, Copy)]
pub struct GuidanceCommand {
    /// 指令速度ベクトル（m/s）
    pub velocity: Vector3,
    /// このティックで適用された誘導フェーズ
    pub phase: GuidancePhase,
    /// 計算時点のターゲットまでの距離（m）
    pub range_m: f64,
}

/// 距離ゼロ（同位置）判定のしきい値
const COLLOCATION_EPSILON_M: f64 = 1e-6;

/// 簡易比例航法による誘導計算
///
/// インターセプタとターゲットの運動状態から、このティックの指令速度を
/// 計算する純粋関数です。ティック間で持ち越される状態は呼び出し側が
/// 所有するインターセプタ速度のみで、この関数自体は履歴を持ちません。
///
/// # 誘導アルゴリズム
///
/// 1. 視線ベクトル L = ターゲット位置 − インターセプタ位置、距離 = ‖L‖
/// 2. 距離 < terminal_range_m: 終末フェーズ。ターゲット現在位置へ
///    最大速度で直行します（この間のターゲット運動は無視）。
/// 3. それ以外: 接近速度 Vc = (インターセプタ速度 − ターゲット速度)・unit(L)
///    を計算し、Vc > 0（幾何的に接近中）の場合のみ横方向補正
///    N・Vc・lateral_scale・dt を進行方向に直交する視線成分の向きに
///    加算します。Vc ≤ 0 の場合は補正なしで慣性飛行します。
///
/// 距離がほぼ0の場合は速度を変更せず返します（同位置は呼び出し側の
/// 迎撃判定で即時成功として扱われるため、ゼロ除算を起こさない）。
///
/// 真の比例航法はLOS角速度から横加速度を求めますが、本実装は接近速度を
/// 代理量とする簡易式を互換性のため維持しています。
pub fn compute_guidance(
    interceptor: &Kinematics,
    max_speed_mps: f64,
    target: &Kinematics,
    params: &GuidanceParams,
    dt: f64,
) -> GuidanceCommand {
    let los = target.position - interceptor.position;
    let range = los.magnitude();

    // 同位置（距離ゼロ）: unit(L)が定義できない縮退ケース
    if range < COLLOCATION_EPSILON_M {
        return GuidanceCommand {
            velocity: interceptor.velocity,
            phase: GuidancePhase::Terminal,
            range_m: range,
        };
    }

    if range < params.terminal_range_m {
        // 終末フェーズ: ターゲット現在位置へ最大速度で直行
        return GuidanceCommand {
            velocity: los.normalize() * max_speed_mps,
            phase: GuidancePhase::Terminal,
            range_m: range,
        };
    }

    // 中間フェーズ: 簡易比例航法
    let los_unit = los * (1.0 / range);
    let closing_velocity = (interceptor.velocity - target.velocity).dot(&los_unit);

    let velocity = if closing_velocity > 0.0 {
        // 進行方向に直交する視線成分を横方向補正軸とする
        // （速度ゼロの場合は視線方向そのものへ向ける）
        let heading = interceptor.velocity.normalize();
        let lateral = los_unit - heading * los_unit.dot(&heading);
        let lateral_magnitude = lateral.magnitude();

        if lateral_magnitude > COLLOCATION_EPSILON_M {
            let axis = lateral * (1.0 / lateral_magnitude);
            let lateral_command = params.n * closing_velocity * params.lateral_scale;
            (interceptor.velocity + axis * (lateral_command * dt)).clamp_magnitude(max_speed_mps)
        } else {
            // 視線と進行方向が一致: 補正不要
            interceptor.velocity
        }
    } else {
        // 接近していない場合は補正せず慣性飛行
        interceptor.velocity
    };

    GuidanceCommand {
        velocity,
        phase: GuidancePhase::Midcourse,
        range_m: range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinematics(px: f64, py: f64, pz: f64, vx: f64, vy: f64, vz: f64) -> Kinematics {
        Kinematics::new(Vector3::new(px, py, pz), Vector3::new(vx, vy, vz))
    }

    #[test]
    fn test_terminal_phase_commands_full_speed_toward_target() {
        // 終末距離内: unit(L) * max_speed が指令される
        let interceptor = kinematics(0.0, 0.0, 0.0, 50.0, 0.0, 0.0);
        let target = kinematics(60.0, 0.0, 80.0, -10.0, 0.0, 0.0);
        let params = GuidanceParams::default();

        let cmd = compute_guidance(&interceptor, 125.0, &target, &params, 0.1);

        assert_eq!(cmd.phase, GuidancePhase::Terminal);
        assert!((cmd.range_m - 100.0).abs() < 1e-9);
        assert!((cmd.velocity.magnitude() - 125.0).abs() < 1e-9);
        // 方向は視線方向 (0.6, 0.0, 0.8)
        assert!((cmd.velocity.x - 75.0).abs() < 1e-9);
        assert!((cmd.velocity.z - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_closing_geometry_coasts() {
        // ターゲットがインターセプタより速く遠ざかる: Vc <= 0 で補正なし
        let interceptor = kinematics(0.0, 0.0, 0.0, 50.0, 0.0, 0.0);
        let target = kinematics(1000.0, 0.0, 0.0, 100.0, 0.0, 0.0);
        let params = GuidanceParams::default();

        let cmd = compute_guidance(&interceptor, 125.0, &target, &params, 0.1);

        assert_eq!(cmd.phase, GuidancePhase::Midcourse);
        assert_eq!(cmd.velocity, interceptor.velocity);
    }

    #[test]
    fn test_closing_geometry_steers_toward_line_of_sight() {
        // 正面接近でターゲットが下方500mにいる: 補正は-z方向のみ
        let interceptor = kinematics(0.0, 0.0, 1000.0, 111.0, 0.0, 0.0);
        let target = kinematics(50000.0, 0.0, 500.0, -51.4, 0.0, 0.0);
        let params = GuidanceParams::default();

        let cmd = compute_guidance(&interceptor, 125.0, &target, &params, 0.1);

        assert_eq!(cmd.phase, GuidancePhase::Midcourse);
        // 横方向補正は進行方向(x)に直交し、この幾何ではz成分のみ
        assert!(cmd.velocity.z < 0.0);
        assert!((cmd.velocity.y).abs() < 1e-12);
        // 指令速度は最大速度以下にクランプされる
        assert!(cmd.velocity.magnitude() <= 125.0 + 1e-9);
    }

    #[test]
    fn test_aligned_heading_needs_no_correction() {
        // 速度が視線と完全に一致: 横方向補正軸が消えて無補正
        let interceptor = kinematics(0.0, 0.0, 0.0, 100.0, 0.0, 0.0);
        let target = kinematics(5000.0, 0.0, 0.0, -50.0, 0.0, 0.0);
        let params = GuidanceParams::default();

        let cmd = compute_guidance(&interceptor, 125.0, &target, &params, 0.1);

        assert_eq!(cmd.velocity, interceptor.velocity);
    }

    #[test]
    fn test_collocated_returns_velocity_unchanged() {
        // 距離ゼロの縮退ケース: 速度を変更せず返す（迎撃判定は呼び出し側）
        let interceptor = kinematics(10.0, 20.0, 30.0, 5.0, 0.0, 0.0);
        let target = kinematics(10.0, 20.0, 30.0, -5.0, 0.0, 0.0);
        let params = GuidanceParams::default();

        let cmd = compute_guidance(&interceptor, 125.0, &target, &params, 0.1);

        assert_eq!(cmd.velocity, interceptor.velocity);
        assert!(cmd.range_m < 1e-6);
    }

    #[test]
    fn test_zero_velocity_falls_back_to_los_axis() {
        // 停止状態から接近判定が成立する場合は視線方向へ向け始める
        let interceptor = kinematics(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let target = kinematics(1000.0, 0.0, 0.0, -50.0, 0.0, 0.0);
        let params = GuidanceParams::default();

        let cmd = compute_guidance(&interceptor, 125.0, &target, &params, 0.1);

        // Vc = (0 - (-50,0,0))・(1,0,0) = 50 > 0 → 視線方向への増分
        assert!(cmd.velocity.x > 0.0);
        assert!((cmd.velocity.y).abs() < 1e-12);
        assert!((cmd.velocity.z).abs() < 1e-12);
    }
}
