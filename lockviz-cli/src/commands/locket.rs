//! `loganalysis locket` command handler

use std::io::Write;

use tracing::info;

use lockviz_chart::PlottersRenderer;
use lockviz_core::config::LockvizConfig;
use lockviz_core::pipeline::ChartRenderer;
use lockviz_log_pipeline::LockPipeline;

use crate::cli::LocketArgs;
use crate::error::CliError;
use crate::output::ImageWriter;

/// Execute the `locket` command.
///
/// Every file is decoded and classified in argument order, then all series are
/// drawn into one PNG written to `writer`. Nothing is written unless every file
/// succeeds.
pub async fn execute<W: Write>(
    args: LocketArgs,
    config: &LockvizConfig,
    writer: &mut ImageWriter<W>,
) -> Result<(), CliError> {
    let pipeline = LockPipeline::from_config(config)?;
    let layout = *pipeline.layout();

    info!(files = args.files.len(), "building lock event series");
    let series = pipeline.build_series(&args.files).await?;

    let renderer = PlottersRenderer::from_config(&config.chart)
        .with_bands(layout.band_height(), config.layout.rows_per_source);
    let color_bucket = layout.bucket_fn();
    let png = renderer.render(&series, &color_bucket)?;

    writer.write_image(&png)?;
    info!(
        format = renderer.format_name(),
        bytes = png.len(),
        "chart written"
    );
    Ok(())
}
