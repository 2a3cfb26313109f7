//! `shape-captions <dataset.json> <out_dir>`
//!
//! Writes `NNNNN.svg` for every image, plus `captions_requested.txt` and
//! `captions_full.txt` with one line per image, in the same order.

use {
  std::{fs, path::{Path, PathBuf}},
  anyhow::{Context, Result, anyhow},
  humansize::{FileSize, file_size_opts as options},
  log::info,
  rayon::prelude::*,
  shape_captions::{
    config::DatasetConfig,
    drawing::render_svg,
    placement::generate_batch,
    profile
  }
};

fn args() -> Result<(PathBuf, PathBuf)> {
  let mut args = std::env::args().skip(1);
  match (args.next(), args.next()) {
    (Some(dataset), Some(out_dir)) => Ok((dataset.into(), out_dir.into())),
    _ => Err(anyhow!("usage: shape-captions <dataset.json> <out_dir>"))
  }
}

fn write_captions(path: &Path, captions: impl Iterator<Item = String>) -> Result<u64> {
  let mut text = captions.collect::<Vec<_>>().join("\n");
  text.push('\n');
  fs::write(path, &text).with_context(|| format!("unable to write {:?}", path))?;
  Ok(text.len() as u64)
}

fn main() -> Result<()> {
  env_logger::init();
  let (dataset_path, out_dir) = args()?;

  let dataset = DatasetConfig::from_file(&dataset_path)
    .with_context(|| format!("unable to load {:?}", dataset_path))?;
  let config = &dataset.configuration;
  let groups = dataset.resolve()?;
  let images = profile!("generate", generate_batch(config, &groups, dataset.seed)?);

  fs::create_dir_all(&out_dir)
    .with_context(|| format!("unable to create {:?}", out_dir))?;
  let svg_size = profile!("draw", images.par_iter()
    .enumerate()
    .map(|(i, image)| -> Result<u64> {
      let path = out_dir.join(format!("{i:05}.svg"));
      let svg = render_svg(config, image);
      fs::write(&path, &svg).with_context(|| format!("unable to write {:?}", path))?;
      Ok(svg.len() as u64)
    })
    .sum::<Result<u64>>()?);

  let caption_size =
    write_captions(&out_dir.join("captions_requested.txt"),
      images.iter().map(|image| image.requested_caption.clone()))? +
    write_captions(&out_dir.join("captions_full.txt"),
      images.iter().map(|image| image.full_caption.clone()))?;

  let total = svg_size + caption_size;
  info!("{} images written to {:?}, {}", images.len(), out_dir,
    total.file_size(options::BINARY).map_err(|e| anyhow!(e))?);
  Ok(())
}
