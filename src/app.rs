use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::config::{Config, ConfigError, ProfileCorrection, ProfileConfig};
use crate::cycle::{CycleError, RankineCycleSolver, DEGENERATE_EFFICIENCY};
use crate::decay_heat::{residence_study, DecayHeatError};
use crate::export::{self, ExportError, ResultMatrix};
use crate::steam::properties::If97;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("내보내기 오류: {0}")]
    Export(#[from] ExportError),
    #[error("붕괴열 계산 오류: {0}")]
    DecayHeat(#[from] DecayHeatError),
    #[error("사이클 계산 오류: {0}")]
    Cycle(#[from] CycleError),
}

/// 실행할 작업.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Profiles,
    Lot,
    Residence,
    Cycle,
    Studies,
    All,
}

/// 설정에 정의된 작업을 실행하고 결과를 출력 디렉터리에 기록한다.
pub fn run(config: &Config, task: Task) -> Result<(), AppError> {
    match task {
        Task::Profiles => run_profiles(config),
        Task::Lot => run_lot(config),
        Task::Residence => run_residence(config),
        Task::Cycle => run_cycle(config),
        Task::Studies => run_studies(config),
        Task::All => {
            run_profiles(config)?;
            run_lot(config)?;
            run_residence(config)?;
            run_cycle(config)?;
            run_studies(config)
        }
    }
}

fn export_to(config: &Config, matrix: &ResultMatrix, file_name: &Path) -> Result<(), AppError> {
    let path = config.output_dir.join(file_name);
    export::write_matrix(matrix, &path)?;
    println!("data written to {}", path.display());
    Ok(())
}

fn run_profile(config: &Config, profile_cfg: &ProfileConfig) -> Result<(), AppError> {
    let mut profile = profile_cfg.build();
    match profile_cfg.correction {
        ProfileCorrection::Uncorrected => {
            profile.generate_uncorrected();
        }
        ProfileCorrection::Corrected => {
            if profile.generate_corrected().is_err() {
                // 설정 문제는 이 프로파일에만 국한된다.
                return Ok(());
            }
        }
    }
    let matrix = profile.to_matrix()?;
    println!("profile {}: {} samples", profile_cfg.name, matrix.length());
    if let Some(file_name) = &profile_cfg.file_name {
        export_to(config, &matrix, file_name)?;
    }
    Ok(())
}

/// 붕괴열 프로파일을 생성한다.
pub fn run_profiles(config: &Config) -> Result<(), AppError> {
    for profile_cfg in &config.profiles {
        run_profile(config, profile_cfg)?;
    }
    Ok(())
}

/// 기준 로트의 집중 붕괴열을 계산한다.
pub fn run_lot(config: &Config) -> Result<(), AppError> {
    let mut lot = config.lot.build()?;
    lot.recompute()?;
    if let Some(report) = lot.report() {
        println!(
            "lumped heat generation: {} ({} elements, hottest {:.4e}, coldest {:.4e})",
            report.net_heat, report.elements_evaluated, report.hottest_element, report.coldest_element
        );
    }
    Ok(())
}

/// 체류 시간별 로트 붕괴열을 계산한다. 결과 행렬은 (체류 시간, 붕괴열) 두 열이다.
pub fn run_residence(config: &Config) -> Result<(), AppError> {
    let lot = config.lot.build()?;
    let times = &config.residence.residence_times;
    let heats = residence_study(&lot, times);
    let values: Vec<f64> = times.iter().zip(&heats).flat_map(|(&t, &q)| [t, q]).collect();
    let matrix = ResultMatrix::new(2, times.len(), values)?;
    for (t, q) in times.iter().zip(&heats) {
        println!("residence {t} s: {q}");
    }
    if let Some(file_name) = &config.residence.file_name {
        export_to(config, &matrix, file_name)?;
    }
    Ok(())
}

/// 단일 랭킨 사이클을 평가한다.
pub fn run_cycle(config: &Config) -> Result<(), AppError> {
    let solver = RankineCycleSolver::with_settings(If97, config.solver);
    match solver.evaluate(&config.cycle) {
        Ok(result) => {
            println!("test rankine efficiency: {}", result.efficiency);
            println!(
                "t1 final = {:.2} K, x2s = {:.4}, x2a = {:.4}, iterations = {}",
                result.hot_leg_temperature,
                result.stations.separation_quality(),
                result.stations.hp_exhaust_quality(),
                result.iterations
            );
            println!(
                "w_hp = {:.1}, w_lp = {:.1}, w_cp = {:.1}, w_fp = {:.1} J/kg",
                result.work.hp_turbine,
                result.work.lp_turbine,
                result.work.condensate_pump,
                result.work.feed_pump
            );
        }
        Err(err) => {
            warn!(error = %err, "랭킨 사이클 평가 실패");
            println!("test rankine efficiency: {DEGENERATE_EFFICIENCY}");
        }
    }
    Ok(())
}

/// 설정된 파라메트릭 스터디를 모두 실행한다.
pub fn run_studies(config: &Config) -> Result<(), AppError> {
    let solver = RankineCycleSolver::with_settings(If97, config.solver);
    for study in &config.studies {
        let mut study = study.clone();
        let size = study.execute(&solver).values().len();
        println!("study {} complete; size = {size}", study.name);
        if let Some(path) = study.export(&config.output_dir)? {
            println!("data written to {}", path.display());
        }
    }
    Ok(())
}
