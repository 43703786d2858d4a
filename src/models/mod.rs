// 基本的なデータ型と数学ユーティリティ
pub mod common;

// 誘導則（純粋関数）
pub mod guidance;

// 各機体モデルの実装
pub mod interceptor;
pub mod target;

// 便利な re-export
pub use common::{Kinematics, Vector3};
pub use guidance::{GuidanceCommand, GuidanceParams, GuidancePhase, compute_guidance};
pub use interceptor::Interceptor;
pub use target::Target;
