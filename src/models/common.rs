use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 3次元ベクトルを表す構造体
///
/// 位置・速度・視線（LOS）ベクトルなど、シミュレーション内の
/// すべての3次元量に共通で使用します。演算は成分ごとの加減算と
/// スカラー倍、およびユークリッドノルム・内積です。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Vector3 {
    pub x: f64, // m または m/s
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// ベクトルの長さ（ユークリッドノルム）
    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    /// 内積を計算
    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// ベクトルを正規化
    ///
    /// 長さが0の場合はそのまま返します（ゼロ除算ガード）。
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self::new(self.x / mag, self.y / mag, self.z / mag)
        } else {
            *self
        }
    }

    /// ベクトル長制限（最大長でクリップ）
    pub fn clamp_magnitude(&self, max_magnitude: f64) -> Self {
        let mag = self.magnitude();
        if mag > max_magnitude {
            let factor = max_magnitude / mag;
            Self::new(self.x * factor, self.y * factor, self.z * factor)
        } else {
            *self
        }
    }

    /// 全成分が有限値（NaN/Infでない）かどうか
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self::Output {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

/// 運動状態（位置と速度の組）
///
/// ターゲットまたはインターセプタが排他的に所有し、
/// 固定時間刻みのオイラー積分で毎ティック更新されます。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub position: Vector3,
    pub velocity: Vector3,
}

impl Kinematics {
    pub fn new(position: Vector3, velocity: Vector3) -> Self {
        Self { position, velocity }
    }

    /// 位置の積分: position += velocity * dt
    pub fn integrate(&mut self, dt: f64) {
        self.position = self.position + self.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, -2.0, 1.0);

        assert_eq!(a + b, Vector3::new(5.0, 0.0, 4.0));
        assert_eq!(a - b, Vector3::new(-3.0, 4.0, 2.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(&b), 3.0);
    }

    #[test]
    fn test_magnitude_and_normalize() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-12);

        let unit = v.normalize();
        assert!((unit.magnitude() - 1.0).abs() < 1e-12);
        assert!((unit.x - 0.6).abs() < 1e-12);

        // ゼロベクトルは正規化してもゼロのまま
        assert_eq!(Vector3::zero().normalize(), Vector3::zero());
    }

    #[test]
    fn test_clamp_magnitude() {
        let v = Vector3::new(30.0, 40.0, 0.0);
        let clamped = v.clamp_magnitude(10.0);
        assert!((clamped.magnitude() - 10.0).abs() < 1e-9);

        // 制限以下のベクトルは変化しない
        assert_eq!(v.clamp_magnitude(100.0), v);
    }

    #[test]
    fn test_is_finite() {
        assert!(Vector3::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Vector3::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Vector3::new(0.0, f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_kinematics_integrate() {
        let mut kin =
            Kinematics::new(Vector3::new(0.0, 0.0, 100.0), Vector3::new(10.0, -5.0, 0.0));
        kin.integrate(0.1);
        assert_eq!(kin.position, Vector3::new(1.0, -0.5, 100.0));
        // 速度は積分では変化しない
        assert_eq!(kin.velocity, Vector3::new(10.0, -5.0, 0.0));
    }
}
