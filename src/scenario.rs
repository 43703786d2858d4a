use crate::models::Vector3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// シナリオメタデータ
#[derive(Debug, Deserialize, Serialize)]
pub struct ScenarioMeta {
    pub version: String,
    pub name: String,
    pub description: String,
}

/// シミュレーション設定
#[derive(Debug, Deserialize, Serialize)]
pub struct SimulationConfig {
    pub dt_s: f64,
    pub t_max_s: f64,
}

/// 誘導則設定
#[derive(Debug, Deserialize, Serialize)]
pub struct GuidanceConfig {
    #[serde(rename = "N")]
    pub n: f64,
    pub terminal_range_m: f64,
    pub lateral_scale: f64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Position3D {
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
}

impl Position3D {
    pub fn to_vector(&self) -> Vector3 {
        Vector3::new(self.x_m, self.y_m, self.z_m)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Velocity3D {
    pub vx_mps: f64,
    pub vy_mps: f64,
    pub vz_mps: f64,
}

impl Velocity3D {
    pub fn to_vector(&self) -> Vector3 {
        Vector3::new(self.vx_mps, self.vy_mps, self.vz_mps)
    }
}

/// インターセプタ設定
#[derive(Debug, Deserialize, Serialize)]
pub struct InterceptorConfig {
    pub position: Position3D,
    pub velocity: Velocity3D,
    pub max_speed_mps: f64,
    pub fuel_s: f64,
    pub intercept_radius_m: f64,
}

/// ターゲット設定
#[derive(Debug, Deserialize, Serialize)]
pub struct TargetConfig {
    pub position: Position3D,
    pub velocity: Velocity3D,
    pub r#type: String, // "type"はRustのキーワードなのでr#でエスケープ
    pub rcs_m2: f64,
}

/// 出力設定（省略可能）
#[derive(Debug, Deserialize, Serialize)]
pub struct OutputConfig {
    /// 軌跡CSVの出力先パス
    pub trajectory_csv: Option<String>,
}

/// 完全なシナリオ設定
#[derive(Debug, Deserialize, Serialize)]
pub struct ScenarioConfig {
    pub meta: ScenarioMeta,
    pub sim: SimulationConfig,
    pub guidance: GuidanceConfig,
    pub interceptor: InterceptorConfig,
    pub target: TargetConfig,
    pub output: Option<OutputConfig>,
}

impl ScenarioConfig {
    /// YAMLファイルからシナリオ設定を読み込み
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();

        // ファイル存在チェック
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.to_path_buf()));
        }

        // ファイル読み込み
        let contents = fs::read_to_string(path)
            .map_err(|e| ScenarioError::IoError(path.to_path_buf(), e))?;

        // YAML解析
        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .map_err(|e| ScenarioError::ParseError(path.to_path_buf(), e))?;

        // 実行前検証
        config.validate()?;

        Ok(config)
    }

    /// 設定の検証
    ///
    /// 不正な設定値はシミュレーション開始前にここで検出され、
    /// 実行は開始されません。
    pub fn validate(&self) -> Result<(), ScenarioError> {
        // 時間設定の検証
        if self.sim.dt_s <= 0.0 || !self.sim.dt_s.is_finite() {
            return Err(ScenarioError::ValidationError(
                "dt_s must be positive".to_string(),
            ));
        }
        if self.sim.t_max_s <= 0.0 || !self.sim.t_max_s.is_finite() {
            return Err(ScenarioError::ValidationError(
                "t_max_s must be positive".to_string(),
            ));
        }

        // 誘導則定数の検証
        if self.guidance.n <= 0.0 || !self.guidance.n.is_finite() {
            return Err(ScenarioError::ValidationError(
                "guidance.N must be positive".to_string(),
            ));
        }
        if self.guidance.terminal_range_m < 0.0 || !self.guidance.terminal_range_m.is_finite() {
            return Err(ScenarioError::ValidationError(
                "guidance.terminal_range_m must not be negative".to_string(),
            ));
        }
        if self.guidance.lateral_scale <= 0.0 || !self.guidance.lateral_scale.is_finite() {
            return Err(ScenarioError::ValidationError(
                "guidance.lateral_scale must be positive".to_string(),
            ));
        }

        // インターセプタ設定の検証
        if self.interceptor.max_speed_mps <= 0.0 || !self.interceptor.max_speed_mps.is_finite() {
            return Err(ScenarioError::ValidationError(
                "interceptor.max_speed_mps must be positive".to_string(),
            ));
        }
        if self.interceptor.fuel_s < 0.0 || !self.interceptor.fuel_s.is_finite() {
            return Err(ScenarioError::ValidationError(
                "interceptor.fuel_s must not be negative".to_string(),
            ));
        }
        if self.interceptor.intercept_radius_m <= 0.0
            || !self.interceptor.intercept_radius_m.is_finite()
        {
            return Err(ScenarioError::ValidationError(
                "interceptor.intercept_radius_m must be positive".to_string(),
            ));
        }

        // 初期状態ベクトルの有限性検証
        if !self.interceptor.position.to_vector().is_finite()
            || !self.interceptor.velocity.to_vector().is_finite()
        {
            return Err(ScenarioError::ValidationError(
                "interceptor position/velocity must be finite".to_string(),
            ));
        }
        if !self.target.position.to_vector().is_finite()
            || !self.target.velocity.to_vector().is_finite()
        {
            return Err(ScenarioError::ValidationError(
                "target position/velocity must be finite".to_string(),
            ));
        }

        Ok(())
    }

    /// 組み込みの正面迎撃テストシナリオ（--testモード用）
    pub fn head_on_test() -> Self {
        Self {
            meta: ScenarioMeta {
                version: "1.0".to_string(),
                name: "組み込み正面迎撃テスト".to_string(),
                description: "正面から接近する自爆型ドローンの迎撃（組み込み設定）".to_string(),
            },
            sim: SimulationConfig {
                dt_s: 0.1,
                t_max_s: 600.0,
            },
            guidance: GuidanceConfig {
                n: 4.0,
                terminal_range_m: 100.0,
                lateral_scale: 0.1,
            },
            interceptor: InterceptorConfig {
                position: Position3D {
                    x_m: 0.0,
                    y_m: 0.0,
                    z_m: 1000.0,
                },
                velocity: Velocity3D {
                    vx_mps: 111.0,
                    vy_mps: 0.0,
                    vz_mps: 0.0,
                },
                max_speed_mps: 125.0,
                fuel_s: 1800.0,
                intercept_radius_m: 10.0,
            },
            target: TargetConfig {
                position: Position3D {
                    x_m: 50000.0,
                    y_m: 0.0,
                    z_m: 500.0,
                },
                velocity: Velocity3D {
                    vx_mps: -51.4,
                    vy_mps: 0.0,
                    vz_mps: 0.0,
                },
                r#type: "shahed_136".to_string(),
                rcs_m2: 0.01,
            },
            output: None,
        }
    }

    /// シナリオの概要を表示
    pub fn print_summary(&self) {
        println!("=== シナリオ情報 ===");
        println!("名前: {}", self.meta.name);
        println!("説明: {}", self.meta.description);
        println!("バージョン: {}", self.meta.version);
        println!();

        println!("=== シミュレーション設定 ===");
        println!("時間刻み: {:.3}秒", self.sim.dt_s);
        println!(
            "最大時間: {:.1}秒 ({:.1}分)",
            self.sim.t_max_s,
            self.sim.t_max_s / 60.0
        );
        println!();

        println!("=== 誘導則設定 ===");
        println!("航法ゲインN: {:.1}", self.guidance.n);
        println!("終末切替距離: {:.0}m", self.guidance.terminal_range_m);
        println!("横方向スケール: {:.2}", self.guidance.lateral_scale);
        println!();

        println!("=== インターセプタ ===");
        let ipos = &self.interceptor.position;
        println!("初期位置: ({:.0}, {:.0}, {:.0})m", ipos.x_m, ipos.y_m, ipos.z_m);
        println!("最大速度: {:.1}m/s", self.interceptor.max_speed_mps);
        println!(
            "燃料: {:.0}秒 ({:.1}分)",
            self.interceptor.fuel_s,
            self.interceptor.fuel_s / 60.0
        );
        println!("迎撃判定距離: {:.1}m", self.interceptor.intercept_radius_m);
        println!();

        println!("=== ターゲット ===");
        let tpos = &self.target.position;
        println!("機種: {}", self.target.r#type);
        println!("初期位置: ({:.0}, {:.0}, {:.0})m", tpos.x_m, tpos.y_m, tpos.z_m);
        println!(
            "速度: {:.1}m/s",
            self.target.velocity.to_vector().magnitude()
        );
        println!("RCS: {:.3}m²", self.target.rcs_m2);

        let initial_range =
            (tpos.to_vector() - self.interceptor.position.to_vector()).magnitude();
        println!("初期距離: {:.0}m", initial_range);
    }
}

/// シナリオ読み込みエラー
#[derive(Debug)]
pub enum ScenarioError {
    FileNotFound(std::path::PathBuf),
    IoError(std::path::PathBuf, std::io::Error),
    ParseError(std::path::PathBuf, serde_yaml::Error),
    ValidationError(String),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::FileNotFound(path) => {
                write!(f, "シナリオファイルが見つかりません: {}", path.display())
            }
            ScenarioError::IoError(path, err) => {
                write!(f, "ファイル読み込みエラー {}: {}", path.display(), err)
            }
            ScenarioError::ParseError(path, err) => {
                write!(f, "YAML解析エラー {}: {}", path.display(), err)
            }
            ScenarioError::ValidationError(msg) => {
                write!(f, "設定検証エラー: {}", msg)
            }
        }
    }
}

impl std::error::Error for ScenarioError {}
