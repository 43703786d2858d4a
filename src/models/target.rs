use crate::models::common::{Kinematics, Vector3};

/// 迎撃対象のターゲット
///
/// 等速直線運動する脅威（自爆型ドローン等）を表します。誘導や燃料の
/// 概念は持たず、シナリオ開始時に生成された速度ベクトルのまま
/// 直線伝搬するだけです。機種ラベルとレーダー反射断面積は報告用の
/// メタデータで、誘導計算には使用されません。
#[derive(Debug, Clone)]
pub struct Target {
    /// 運動状態（位置と速度）
    pub kinematics: Kinematics,
    /// 機種ラベル（報告用）
    pub target_type: String,
    /// レーダー反射断面積（m²、報告用）
    pub rcs_m2: f64,
}

impl Target {
    pub fn new(position: Vector3, velocity: Vector3, target_type: String, rcs_m2: f64) -> Self {
        Self {
            kinematics: Kinematics::new(position, velocity),
            target_type,
            rcs_m2,
        }
    }

    /// 1ティック分の直線伝搬: position += velocity * dt
    pub fn advance(&mut self, dt: f64) {
        self.kinematics.integrate(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_straight_line_propagation() {
        let mut target = Target::new(
            Vector3::new(50000.0, 0.0, 500.0),
            Vector3::new(-51.4, 0.0, 0.0),
            "shahed_136".to_string(),
            0.01,
        );

        target.advance(0.1);
        assert!((target.kinematics.position.x - 49994.86).abs() < 1e-9);
        assert_eq!(target.kinematics.position.y, 0.0);
        assert_eq!(target.kinematics.position.z, 500.0);

        // 速度はシナリオ中一定
        assert_eq!(target.kinematics.velocity, Vector3::new(-51.4, 0.0, 0.0));
    }
}
