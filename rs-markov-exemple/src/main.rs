use std::io::Write;

use rs_markov_core::model::generator::generate;
use rs_markov_core::model::link_config::LinkConfig;
use rs_markov_core::model::page::render_page;
use rs_markov_core::model::registry::CorpusRegistry;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Build one model per regular file of the "texts" directory
    // Any unreadable file aborts here
    let registry = CorpusRegistry::build("./texts")?;
    for (i, name) in registry.names().iter().enumerate() {
        println!("corpus {}: {}", i, name);
    }

    // Link parameters: 10% internal links by default, no external links
    let mut links = LinkConfig::default();
    links.set_extern_link_threshold(0.05)?;
    links.extern_prefix = "mirror".to_owned();
    links.extern_suffix = ".example.org".to_owned();
    links.extern_servers = 3;

    // Probabilities must be between 0.0 and 1.0
    match links.set_intern_link_threshold(2.0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{}", e),
    }

    // The seed is the page identity: the same seed gives the same page
    let seed = 1234;
    let first = render_page(&registry, seed, 200, &links);
    let second = render_page(&registry, seed, 200, &links);
    assert_eq!(first, second);

    let mut stdout = std::io::stdout();
    stdout.write_all(&first)?;

    // A bare fragment of the first corpus, 50 words at most
    stdout.write_all(&generate(&registry, 0, seed, 50, &links))?;
    stdout.write_all(b"\n")?;

    Ok(())
}
