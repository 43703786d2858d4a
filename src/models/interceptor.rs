use crate::models::common::{Kinematics, Vector3};
use crate::models::guidance::{GuidanceParams, GuidancePhase, compute_guidance};
use crate::models::target::Target;

/// 迎撃機（インターセプタ）
///
/// 運動状態に加えて最大速度・残燃料・迎撃判定距離を持ちます。
/// 毎ティック誘導則の出力を自身の速度に反映し、位置を積分して
/// 燃料を減算します。ターゲットの状態を変更することはありません。
#[derive(Debug, Clone)]
pub struct Interceptor {
    /// 運動状態（位置と速度）
    pub kinematics: Kinematics,
    /// 最大速度（m/s）
    pub max_speed_mps: f64,
    /// 残燃料（全力飛行の残り秒数）
    pub fuel_remaining_s: f64,
    /// 迎撃判定距離（m）
    pub intercept_radius_m: f64,
}

impl Interceptor {
    pub fn new(
        position: Vector3,
        velocity: Vector3,
        max_speed_mps: f64,
        fuel_s: f64,
        intercept_radius_m: f64,
    ) -> Self {
        Self {
            kinematics: Kinematics::new(position, velocity),
            max_speed_mps,
            fuel_remaining_s: fuel_s,
            intercept_radius_m,
        }
    }

    /// 1ティック分の前進処理
    ///
    /// 1. 誘導則を呼び出して速度を更新
    /// 2. 位置を積分: position += velocity * dt
    /// 3. 燃料を減算: fuel_remaining_s -= dt
    ///
    /// 自身の状態のみを変更し、ターゲットには触れません。
    /// 戻り値はこのティックで適用された誘導フェーズです。
    pub fn advance(&mut self, target: &Target, params: &GuidanceParams, dt: f64) -> GuidancePhase {
        let command = compute_guidance(
            &self.kinematics,
            self.max_speed_mps,
            &target.kinematics,
            params,
            dt,
        );

        self.kinematics.velocity = command.velocity;
        self.kinematics.integrate(dt);
        self.fuel_remaining_s -= dt;

        command.phase
    }

    /// ターゲットまでの距離（毎回位置から再計算、累積しない）
    pub fn range_to(&self, target: &Target) -> f64 {
        (target.kinematics.position - self.kinematics.position).magnitude()
    }

    /// 迎撃判定: 距離 < 迎撃判定距離
    pub fn is_intercept(&self, target: &Target) -> bool {
        self.range_to(target) < self.intercept_radius_m
    }

    /// 燃料切れ判定
    pub fn is_fuel_exhausted(&self) -> bool {
        self.fuel_remaining_s <= 0.0
    }
}
