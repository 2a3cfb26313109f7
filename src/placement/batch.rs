use {
  log::info,
  rayon::prelude::*,
  crate::{
    config::Configuration,
    description::Description,
    error::Result,
    placement::{Generator, Image}
  }
};

/// Generates `images_per_description` images for every group, in parallel.
///
/// The output is allocated up front and split into one chunk per group; task
/// `i` owns chunk `i` and a generator on stream `i` of `seed`. Tasks share
/// nothing mutable, so the result does not depend on scheduling or thread count.
pub fn generate_batch(
  config: &Configuration,
  groups: &[Vec<Description>],
  seed: u64
) -> Result<Vec<Image>> {
  config.validate()?;
  let per_group = config.images_per_description;
  info!("generating {} images for {} groups", groups.len() * per_group, groups.len());

  let mut slots: Vec<Option<Image>> = (0..groups.len() * per_group)
    .map(|_| None)
    .collect();
  slots.par_chunks_mut(per_group)
    .zip(groups.par_iter())
    .enumerate()
    .try_for_each(|(index, (chunk, group))| -> Result<()> {
      let mut generator = Generator::with_stream(config.clone(), seed, index as u64)?;
      for slot in chunk.iter_mut() {
        *slot = Some(generator.generate(group)?);
      }
      Ok(())
    })?;

  Ok(slots.into_iter().flatten().collect())
}
