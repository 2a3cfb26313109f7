/// Evaluates `$expr`, logs its wall time at info level and returns its value.
#[macro_export]
macro_rules! profile(
  ($title: literal, $expr: expr) => {{
    let t0 = std::time::Instant::now();
    let result = $expr;
    log::info!("{} profile: {}ms", $title, t0.elapsed().as_millis());
    result
  }}
);
