use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cycle::{CycleStudy, CycleTemplate, RankineCycleSpec, SolverSettings};
use crate::decay_heat::{DecayHeatError, DecayHeatProfile, FuelLot};

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "snf_power.toml";

/// 프로파일 생성 시 사용할 상관식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileCorrection {
    /// ANS 근사식 그대로
    #[default]
    Uncorrected,
    /// 경험 보정 곡선 적용 (유한 운전 기간 필요)
    Corrected,
}

fn unit_power() -> f64 {
    1.0
}

/// 붕괴열 프로파일 한 건의 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    /// 정지 후 경과 시간(s)
    pub times: Vec<f64>,
    /// 정지 전 운전 기간(s). 0이면 무한 운전.
    #[serde(default)]
    pub prior_operating_duration: f64,
    #[serde(default = "unit_power")]
    pub reference_power: f64,
    #[serde(default)]
    pub correction: ProfileCorrection,
    #[serde(default)]
    pub file_name: Option<PathBuf>,
}

impl ProfileConfig {
    pub fn build(&self) -> DecayHeatProfile {
        DecayHeatProfile::with_power(
            self.times.clone(),
            self.prior_operating_duration,
            self.reference_power,
        )
    }
}

/// 로트 크기 지정 방식.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotSizing {
    /// 배출 속도(개/s)
    DischargeRate(f64),
    /// 체류 시간 내 요소 수
    Population(usize),
}

/// 사용후핵연료 로트 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotConfig {
    pub prior_operating_duration: f64,
    pub reference_power: f64,
    pub residence_time: f64,
    #[serde(default)]
    pub residence_offset: f64,
    pub sizing: LotSizing,
}

impl LotConfig {
    pub fn build(&self) -> Result<FuelLot, DecayHeatError> {
        match self.sizing {
            LotSizing::DischargeRate(rate) => FuelLot::from_discharge_rate(
                self.prior_operating_duration,
                self.reference_power,
                self.residence_time,
                self.residence_offset,
                rate,
            ),
            LotSizing::Population(population) => FuelLot::from_population(
                self.prior_operating_duration,
                self.reference_power,
                self.residence_time,
                self.residence_offset,
                population,
            ),
        }
    }
}

impl Default for LotConfig {
    /// Pebble-bed FHR 배출 연료, 5년 체류.
    fn default() -> Self {
        Self {
            prior_operating_duration: 441_806_400.0,
            reference_power: 0.555,
            residence_time: 1_577_880_000.0,
            residence_offset: 0.0,
            sizing: LotSizing::DischargeRate(0.009_624),
        }
    }
}

/// 체류 시간 스터디 설정. 기준 로트는 [`Config::lot`]을 사용한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidenceConfig {
    pub residence_times: Vec<f64>,
    #[serde(default)]
    pub file_name: Option<PathBuf>,
}

impl Default for ResidenceConfig {
    fn default() -> Self {
        const YEAR_S: f64 = 31_557_600.0;
        Self {
            residence_times: (1..=5).map(|y| y as f64 * YEAR_S).collect(),
            file_name: Some(PathBuf::from("lot_residence.csv")),
        }
    }
}

const ANS_TEST_TIMES: [f64; 7] = [7.0, 200.0, 17_000.0, 800_000.0, 5_000_000.0, 65_000_000.0, 900_000_000.0];

const HTTR_TIMES: [f64; 62] = [
    86_000.0, 172_800.0, 259_200.0, 345_600.0, 432_000.0, 518_400.0, 604_800.0, 691_200.0,
    777_600.0, 864_000.0, 950_400.0, 1_037_000.0, 1_123_000.0, 1_210_000.0, 1_296_000.0,
    1_382_000.0, 1_469_000.0, 1_555_000.0, 1_642_000.0, 1_728_000.0, 1_814_000.0, 1_987_000.0,
    2_074_000.0, 2_160_000.0, 2_246_000.0, 2_333_000.0, 2_419_000.0, 2_506_000.0, 2_592_000.0,
    5_098_000.0, 11_500_000.0, 15_980_000.0, 20_820_000.0, 26_870_000.0, 31_710_000.0,
    38_970_000.0, 42_600_000.0, 47_430_000.0, 48_610_000.0, 51_060_000.0, 54_690_000.0,
    57_110_000.0, 59_530_000.0, 63_160_000.0, 69_210_000.0, 72_840_000.0, 78_888_000.0,
    82_510_000.0, 84_930_000.0, 88_560_000.0, 90_980_000.0, 94_610_000.0, 98_240_000.0,
    101_900_000.0, 104_300_000.0, 106_700_000.0, 110_300_000.0, 114_000_000.0, 116_400_000.0,
    120_000_000.0, 123_600_000.0, 126_100_000.0,
];

fn default_profiles() -> Vec<ProfileConfig> {
    vec![
        ProfileConfig {
            name: "ans-check".into(),
            times: ANS_TEST_TIMES.to_vec(),
            prior_operating_duration: 0.0,
            reference_power: 1.0,
            correction: ProfileCorrection::Uncorrected,
            file_name: Some(PathBuf::from("test-fe_heat.csv")),
        },
        ProfileConfig {
            name: "httr".into(),
            times: HTTR_TIMES.to_vec(),
            prior_operating_duration: 57_000_000.0,
            reference_power: 30_000.0,
            correction: ProfileCorrection::Corrected,
            file_name: Some(PathBuf::from("dh_httr_ans.csv")),
        },
    ]
}

fn default_studies() -> Vec<CycleStudy> {
    let template = CycleTemplate::from(RankineCycleSpec::default());
    vec![CycleStudy::new(
        "rankine-flow-pressure",
        template,
        vec![0.08, 0.1, 0.114, 0.13, 0.15],
        vec![200_000.0, 345_000.0, 500_000.0, 750_000.0, 1_000_000.0],
    )
    .with_file_name("study_rankine.csv")]
}

/// 애플리케이션 설정. 모든 스터디 입력을 명시적으로 담는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSV 출력 디렉터리
    pub output_dir: PathBuf,
    pub solver: SolverSettings,
    pub profiles: Vec<ProfileConfig>,
    pub lot: LotConfig,
    pub residence: ResidenceConfig,
    /// 단일 사이클 평가 입력
    pub cycle: RankineCycleSpec,
    pub studies: Vec<CycleStudy>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            solver: SolverSettings::default(),
            profiles: default_profiles(),
            lot: LotConfig::default(),
            residence: ResidenceConfig::default(),
            cycle: RankineCycleSpec::default(),
            studies: default_studies(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성해 저장한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load_from(path)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        Ok(cfg)
    }
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

impl Config {
    /// 설정을 `path`에 TOML로 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
