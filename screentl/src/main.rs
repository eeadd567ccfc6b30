// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Binary entry point: parses and validates CLI arguments, wires the engine
//! together, and dispatches on the requested command.

use std::sync::Arc;
use std::time::Duration;

use screentl::application::{OrchestratorLanguages, TranslationOrchestrator};
use screentl::infrastructure::capture::{RegionCoordinator, ScreenCaptureBackend};
use screentl::infrastructure::config::TranslatorConfig;
use screentl::infrastructure::metrics::MetricsService;
use screentl::infrastructure::ocr::NullOcrEngine;
use screentl::infrastructure::optimizers::{
    AsyncPipelineOptimizer, FrameSkipOptimizer, MotionTrackerOptimizer, OptimizerHost, ParallelTranslationOptimizer, SpellCorrectorOptimizer,
    TextBlockMergerOptimizer, TranslationCacheOptimizer,
};
use screentl::infrastructure::overlay::{NullOverlayRenderer, OverlayTracker};
use screentl::infrastructure::resilience::TranslatorErrorHandler;
use screentl::infrastructure::runtime::{init_resource_manager, resource_manager, CancellationToken, ResourceConfig};
use screentl::infrastructure::translation::{DictionaryFileRepository, IdentityTranslationEngine, QualityFilter, QualityFilterConfig, TranslationCache};
use screentl::infrastructure::validation::TextValidator;
use screentl_bootstrap::cli::ValidatedCommand;
use screentl_bootstrap::shutdown::ShutdownCoordinator;
use screentl_bootstrap::signals::create_signal_handler;
use screentl_bootstrap::{bootstrap_cli, result_to_exit_code, ExitCode};
use screentl_domain::error::TranslatorError;
use screentl_domain::value_objects::{LanguageTag, MultiRegionConfig};

fn load_regions(path: &std::path::Path) -> Result<MultiRegionConfig, TranslatorError> {
    let contents = std::fs::read_to_string(path)?;
    let config: MultiRegionConfig = serde_json::from_str(&contents)?;
    MultiRegionConfig::new(config.regions)
}

async fn run(cli: screentl_bootstrap::ValidatedCli) -> Result<(), TranslatorError> {
    let resource_config = ResourceConfig {
        cpu_tokens: cli.cpu_threads,
        ..Default::default()
    };
    init_resource_manager(resource_config).map_err(TranslatorError::internal)?;
    let manager = resource_manager();
    tracing::info!(
        cpu_tokens = manager.cpu_tokens_total(),
        io_tokens = manager.io_tokens_total(),
        "resource manager initialized"
    );

    let config_path = cli.config.as_deref().and_then(|p| p.to_str());
    let config = TranslatorConfig::load(config_path)?;

    match cli.command {
        ValidatedCommand::ShowConfig => {
            println!("{config:#?}");
            Ok(())
        }
        ValidatedCommand::ValidateConfig { config: path } => {
            TranslatorConfig::load(path.to_str())?;
            println!("configuration is valid: {}", path.display());
            Ok(())
        }
        ValidatedCommand::ValidateRegions { regions } => {
            let parsed = load_regions(&regions)?;
            println!("{} region(s) valid, {} enabled", parsed.regions.len(), parsed.enabled_regions().count());
            Ok(())
        }
        ValidatedCommand::Run { regions, source_language, target_language } => {
            run_session(&config, &regions, source_language, target_language).await
        }
    }
}

async fn run_session(
    config: &TranslatorConfig,
    regions_path: &std::path::Path,
    source_language: Option<String>,
    target_language: Option<String>,
) -> Result<(), TranslatorError> {
    let regions = load_regions(regions_path)?;
    let source_lang = LanguageTag::new(source_language.unwrap_or_else(|| config.translation.source_language.clone()))?;
    let target_lang = LanguageTag::new(target_language.unwrap_or_else(|| config.translation.target_language.clone()))?;

    let backend = Arc::new(ScreenCaptureBackend::new());
    let coordinator = Arc::new(RegionCoordinator::new(backend));
    coordinator.load_config(&regions).await?;

    let ocr_engine = Arc::new(NullOcrEngine::new());
    let overlay_renderer = Arc::new(NullOverlayRenderer::new());
    let dictionary_repository = Arc::new(DictionaryFileRepository::new("dictionaries"));
    let overlay_tracker = Arc::new(OverlayTracker::new(config.overlay.disappear_timeout));
    let text_validator = Arc::new(TextValidator::default());
    let quality_filter_config = match config.translation.quality_filter_mode.as_str() {
        "strict" => QualityFilterConfig { enabled: config.translation.quality_filter_enabled, ..QualityFilterConfig::strict() },
        _ => QualityFilterConfig {
            enabled: config.translation.quality_filter_enabled,
            min_confidence: config.translation.confidence_threshold,
            ..Default::default()
        },
    };
    let quality_filter = Arc::new(QualityFilter::new(quality_filter_config));
    let error_handler = Arc::new(TranslatorErrorHandler::new());
    let metrics = Arc::new(MetricsService::new()?);

    let mut optimizer_host = OptimizerHost::new();
    if config.performance.enable_frame_skip {
        optimizer_host.register(Arc::new(FrameSkipOptimizer::new()));
    }
    if config.performance.enable_roi_detection {
        optimizer_host.register(Arc::new(MotionTrackerOptimizer::default()));
    }
    optimizer_host.register(Arc::new(TextBlockMergerOptimizer::default()));
    optimizer_host.register(Arc::new(SpellCorrectorOptimizer::default()));
    let translation_cache = Arc::new(TranslationCache::default());
    if config.translation.cache_enabled {
        optimizer_host.register(Arc::new(TranslationCacheOptimizer::new(
            translation_cache.clone(),
            metrics.clone(),
            source_lang.clone(),
            target_lang.clone(),
        )));
    }
    let translation_engine = Arc::new(IdentityTranslationEngine::new());
    let translation_workers = config.pipeline.parallel_translation.workers.max(1);
    let mut parallel_translation = ParallelTranslationOptimizer::new(translation_engine, translation_workers, source_lang.clone(), target_lang.clone());
    if config.translation.cache_enabled {
        parallel_translation = parallel_translation.with_cache(translation_cache);
    }
    optimizer_host.register(Arc::new(parallel_translation));
    if config.performance.batch_translation {
        optimizer_host.register(Arc::new(AsyncPipelineOptimizer::default()));
    }
    let optimizer_host = Arc::new(optimizer_host);

    let orchestrator = Arc::new(TranslationOrchestrator::new(
        coordinator.clone(),
        ocr_engine,
        overlay_renderer,
        dictionary_repository,
        optimizer_host,
        overlay_tracker,
        text_validator,
        quality_filter,
        error_handler,
        metrics,
        OrchestratorLanguages { source: source_lang, target: target_lang },
        "identity",
    ));

    let shutdown = ShutdownCoordinator::default();
    let signal_handler = create_signal_handler();
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        signal_handler
            .wait_for_signal(Box::new(move || shutdown_for_signal.initiate_shutdown()))
            .await;
    });

    let region_ids = coordinator.region_ids().await;
    let mut handles = Vec::with_capacity(region_ids.len());
    for region_id in region_ids {
        let orchestrator = orchestrator.clone();
        let cancel = CancellationToken::new();
        let bootstrap_token = shutdown.token();
        let region_cancel = cancel.clone();
        tokio::spawn(async move {
            bootstrap_token.cancelled().await;
            region_cancel.cancel();
        });
        handles.push(tokio::spawn(async move {
            orchestrator.run_region(&region_id, cancel).await;
        }));
    }

    shutdown.token().cancelled().await;

    let join_all = async {
        for handle in handles {
            let _ = handle.await;
        }
    };
    if tokio::time::timeout(Duration::from_secs(screentl_bootstrap::shutdown::DEFAULT_GRACE_PERIOD_SECS), join_all)
        .await
        .is_err()
    {
        tracing::warn!("grace period expired before all region loops stopped");
    }
    coordinator.shutdown().await;
    shutdown.complete_shutdown();

    Ok(())
}

#[tokio::main]
async fn main() {
    screentl_bootstrap::logger::init();

    let cli = match bootstrap_cli() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("argument error: {err}");
            std::process::exit(ExitCode::UsageError.as_i32());
        }
    };

    let verbose = cli.verbose;
    if verbose {
        tracing::debug!(?cli, "parsed and validated CLI arguments");
    }

    let result = run(cli).await;
    let exit_code = result_to_exit_code(result);
    std::process::exit(exit_code.as_i32());
}
