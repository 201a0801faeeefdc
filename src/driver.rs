//! 命令行驱动：加载配置，逐个翻译输入文件，并把结果写到标准输出、单个文件或输出目录。
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, warn};
use rayon::prelude::*;

use crate::config::FastConfig;
use crate::extern_tools::FastTranslator;
use crate::net::io::{self, pnml};
use crate::options::{Options, OutputFormat};

/// 命令行选项合并到配置文件之上得到的最终配置。
pub fn effective_config(options: &Options) -> Result<FastConfig> {
    let mut config = FastConfig::load_from_file(&options.config)?;
    if let Some(region) = &options.init_region {
        config.init_region = Some(region.clone());
    }
    Ok(config)
}

pub fn run(options: &Options) -> Result<()> {
    let config = effective_config(options)?;
    debug!("FAST configuration: {:?}", config);

    let translator = FastTranslator::new(config);

    // 各输入相互独立，并行翻译后按输入顺序输出
    let results: Vec<Result<String>> = options
        .inputs
        .par_iter()
        .map(|input| translate(&translator, options, input))
        .collect();

    let mut failures = 0;
    for (input, result) in options.inputs.iter().zip(results) {
        if let Err(err) = result.and_then(|text| emit(options, input, &text)) {
            error!("{input}: {err:#}");
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} inputs failed", failures, options.inputs.len());
    }
    Ok(())
}

pub fn translate(translator: &FastTranslator, options: &Options, input: &str) -> Result<String> {
    let mut net = pnml::import_pnml_file(input)
        .with_context(|| format!("Failed to load PNML file: {:?}", input))?;

    if options.diagnose {
        let report = net.diagnose();
        if report.has_issues() {
            warn!("{input}: {report}");
        } else {
            debug!("{input}: {report}");
        }
    }

    if options.silent {
        net = net.silent_restriction();
    }

    let text = match options.format {
        OutputFormat::Fast => translator.convert(&net),
        OutputFormat::Json => io::to_json_string(&net)?,
        OutputFormat::Ron => io::to_ron_string(&net)?,
    };
    Ok(text)
}

/// 输出位置：`-o` 优先，其次 `-d` 目录下的 `<stem>.<ext>`，都没有时为标准输出（`None`）。
pub fn destination(options: &Options, input: &str) -> Option<PathBuf> {
    match (&options.output, &options.out_dir) {
        (Some(output), _) => Some(PathBuf::from(output)),
        (None, Some(dir)) => Some(output_path(dir, input, options.format)),
        (None, None) => None,
    }
}

fn emit(options: &Options, input: &str, text: &str) -> Result<()> {
    match destination(options, input) {
        Some(path) => {
            io::write_string(&path, text)
                .with_context(|| format!("Failed to write {:?}", path))?;
            debug!("{input} -> {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

pub fn output_path(dir: &str, input: &str, format: OutputFormat) -> PathBuf {
    let stem = Path::new(input)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "net".to_string());
    Path::new(dir).join(format!("{}.{}", stem, format.extension()))
}
