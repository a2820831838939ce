//! Generate static files

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Blog;

/// Load every post and render the site
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = ContentLoader::new(blog).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    let written = Generator::new(blog).generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages in {:.2}s",
        written.len(),
        duration.as_secs_f64()
    );

    Ok(())
}
