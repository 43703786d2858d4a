//! # Simulation モジュール
//!
//! 迎撃シミュレーションの中核となるシミュレーションエンジンを提供します。
//!
//! このモジュールは、固定時間刻み（Δt）による時間駆動シミュレーションの
//! メインループを管理し、ターゲットとインターセプタの運動積分・誘導計算・
//! 迎撃判定・資源（時間/燃料）管理を制御します。
//!
//! ## 状態遷移
//!
//! エンジンは `Running → {Intercepted, Exhausted}` の状態機械です。
//! 迎撃成功（Intercepted）と資源切れ（Exhausted）はどちらも正常な
//! 終了結果であり、エラーとしては扱いません。
//!
//! ## ティック処理順序
//!
//! 各時間刻みにおいて、以下の順序で処理が実行されます：
//!
//! 1. **ターゲット前進**: 等速直線運動による位置更新
//! 2. **インターセプタ前進**: 誘導計算、位置積分、燃料減算
//! 3. **迎撃判定**: 成立した場合はこのティックの記録を残さず終了
//! 4. **軌跡記録**: 時刻・両機位置・距離・速さを追記し、時刻を進める
//! 5. **資源判定**: 最大時間または燃料切れでExhaustedへ遷移
//!
//! 距離は毎ティック両機の位置から再計算され、増分累積はしません。
//!
//! ## 使用例
//!
//! ```rust
//! use intsim::scenario::ScenarioConfig;
//! use intsim::simulation::SimulationEngine;
//!
//! let config = ScenarioConfig::from_file("scenarios/scenario_head_on.yaml")?;
//! let mut engine = SimulationEngine::new(&config, 1); // verbose_level=1
//! let result = engine.run();
//! ```

use crate::models::{GuidanceParams, GuidancePhase, Interceptor, Target, Vector3};
use crate::scenario::ScenarioConfig;
use tracing::{debug, info, trace, warn};

/// シミュレーションの状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationState {
    /// 実行中
    Running,
    /// 迎撃成功（終端状態）
    Intercepted,
    /// 時間または燃料の枯渇（終端状態、正常な失敗結果）
    Exhausted,
}

/// 軌跡サンプル
///
/// 終端ティックを除く各ティックで1件追記される記録です。
/// 速さは実際のティック時点の速度ベクトルの大きさを記録します。
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySample {
    /// シミュレーション時刻（秒）
    pub time_s: f64,
    /// インターセプタ位置
    pub interceptor_position: Vector3,
    /// ターゲット位置
    pub target_position: Vector3,
    /// 両機間距離（m、位置から再計算した値）
    pub range_m: f64,
    /// インターセプタの速さ（m/s）
    pub interceptor_speed_mps: f64,
}

/// シミュレーション結果
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// 迎撃に成功したか
    pub intercepted: bool,
    /// 迎撃時刻（秒）。迎撃失敗時はNone
    pub intercept_time_s: Option<f64>,
    /// 終了時点の両機間距離（m）
    pub final_range_m: f64,
    /// 記録された軌跡（終端ティックは含まない）
    pub trajectory: Vec<TrajectorySample>,
}

/// シミュレーションエンジン
///
/// ターゲットとインターセプタの状態を排他的に所有し、単一スレッドの
/// 同期ループで1回の決定的な実行を行います。ループ内にI/Oはなく
/// （tracingイベントを除く）、報告系はrunが返す結果のみを消費します。
pub struct SimulationEngine {
    pub current_time: f64,
    pub dt: f64,
    pub max_time: f64,
    pub step_count: u64,
    pub state: SimulationState,

    pub target: Target,
    pub interceptor: Interceptor,
    pub guidance_params: GuidanceParams,

    trajectory: Vec<TrajectorySample>,
    intercept_time: Option<f64>,
    last_phase: GuidancePhase,
    pub verbose_level: u8,
}

impl SimulationEngine {
    /// 検証済みシナリオ設定からエンジンを構築
    pub fn new(config: &ScenarioConfig, verbose_level: u8) -> Self {
        let target = Target::new(
            config.target.position.to_vector(),
            config.target.velocity.to_vector(),
            config.target.r#type.clone(),
            config.target.rcs_m2,
        );

        let interceptor = Interceptor::new(
            config.interceptor.position.to_vector(),
            config.interceptor.velocity.to_vector(),
            config.interceptor.max_speed_mps,
            config.interceptor.fuel_s,
            config.interceptor.intercept_radius_m,
        );

        let guidance_params = GuidanceParams {
            n: config.guidance.n,
            terminal_range_m: config.guidance.terminal_range_m,
            lateral_scale: config.guidance.lateral_scale,
        };

        Self {
            current_time: 0.0,
            dt: config.sim.dt_s,
            max_time: config.sim.t_max_s,
            step_count: 0,
            state: SimulationState::Running,
            target,
            interceptor,
            guidance_params,
            trajectory: Vec::new(),
            intercept_time: None,
            last_phase: GuidancePhase::Midcourse,
            verbose_level,
        }
    }

    /// シミュレーションを終端状態まで実行し、結果を返す
    pub fn run(&mut self) -> SimulationResult {
        info!(
            target_type = %self.target.target_type,
            initial_range_m = self.interceptor.range_to(&self.target),
            dt_s = self.dt,
            t_max_s = self.max_time,
            fuel_s = self.interceptor.fuel_remaining_s,
            "SIM_START: シミュレーション実行開始"
        );

        while self.state == SimulationState::Running {
            self.step();

            if self.verbose_level > 2 {
                trace!(
                    time_s = self.current_time,
                    step = self.step_count,
                    range_m = self.interceptor.range_to(&self.target),
                    "ティック完了"
                );
            }

            if self.step_count % 500 == 0 && self.step_count > 0 && self.verbose_level > 0 {
                let progress = (self.current_time / self.max_time) * 100.0;
                info!(
                    "進行状況: {:.1}% ({:.1}/{:.1}秒, 距離: {:.0}m)",
                    progress,
                    self.current_time,
                    self.max_time,
                    self.interceptor.range_to(&self.target)
                );
            }
        }

        let result = SimulationResult {
            intercepted: self.state == SimulationState::Intercepted,
            intercept_time_s: self.intercept_time,
            final_range_m: self.interceptor.range_to(&self.target),
            trajectory: std::mem::take(&mut self.trajectory),
        };

        info!(
            intercepted = result.intercepted,
            final_range_m = result.final_range_m,
            samples = result.trajectory.len(),
            elapsed_s = self.current_time,
            "SIM_END: シミュレーション完了"
        );

        result
    }

    /// 1ティック分の処理
    fn step(&mut self) {
        // 1. ターゲット前進
        self.target.advance(self.dt);

        // 2. インターセプタ前進（誘導→積分→燃料減算）
        let phase = self
            .interceptor
            .advance(&self.target, &self.guidance_params, self.dt);

        if phase != self.last_phase {
            debug!(
                time_s = self.current_time,
                previous_phase = ?self.last_phase,
                current_phase = ?phase,
                range_m = self.interceptor.range_to(&self.target),
                "PHASE_TRANSITION: 誘導フェーズが切り替わりました"
            );
            self.last_phase = phase;
        }

        // 3. 迎撃判定（成立したティックは軌跡に記録しない）
        let range = self.interceptor.range_to(&self.target);
        if self.interceptor.is_intercept(&self.target) {
            self.state = SimulationState::Intercepted;
            self.intercept_time = Some(self.current_time);

            info!(
                intercept_time_s = self.current_time,
                intercept_range_m = range,
                fuel_remaining_s = self.interceptor.fuel_remaining_s,
                "INTERCEPT: ターゲットを迎撃しました"
            );
            return;
        }

        // 4. 軌跡記録と時刻前進
        self.trajectory.push(TrajectorySample {
            time_s: self.current_time,
            interceptor_position: self.interceptor.kinematics.position,
            target_position: self.target.kinematics.position,
            range_m: range,
            interceptor_speed_mps: self.interceptor.kinematics.velocity.magnitude(),
        });
        self.current_time += self.dt;
        self.step_count += 1;

        // 5. 資源判定（時間・燃料）
        if self.current_time >= self.max_time {
            self.state = SimulationState::Exhausted;
            warn!(
                elapsed_s = self.current_time,
                final_range_m = range,
                "TIME_EXPIRED: 最大時間に達しました（迎撃失敗）"
            );
        } else if self.interceptor.is_fuel_exhausted() {
            self.state = SimulationState::Exhausted;
            warn!(
                elapsed_s = self.current_time,
                final_range_m = range,
                "FUEL_EXHAUSTED: 燃料が尽きました（迎撃失敗）"
            );
        }
    }
}
