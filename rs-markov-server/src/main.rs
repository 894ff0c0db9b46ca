mod config;

use actix_web::{get, middleware, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use anyhow::Context;
use clap::Parser;
use log::{error, info};
use rand::Rng;
use serde::Deserialize;

use config::{Cli, GenConfig};
use rs_markov_core::model::generator::generate;
use rs_markov_core::model::link_config::LinkConfig;
use rs_markov_core::model::page::{parse_seed, render_page};
use rs_markov_core::model::registry::CorpusRegistry;

/// Query parameters of the `/v1/generate` endpoint.
#[derive(Deserialize)]
struct GenerateParams {
	seed: Option<u32>,
	words: Option<usize>,
	corpus: Option<u32>,
}

/// Read-only state shared by every worker.
///
/// No lock: the registry is never mutated once built.
struct SharedData {
	registry: CorpusRegistry,
	links: LinkConfig,
	words_per_page: u32,
	content_type: String,
}

impl SharedData {
	fn new(registry: CorpusRegistry, config: &GenConfig) -> Self {
		Self {
			registry,
			links: config.link_config(),
			words_per_page: config.words_per_page,
			content_type: config.content_type(),
		}
	}
}

/// Any path: the page whose seed is in the path, e.g. `/1234.html`.
///
/// A path without a seed gets a page from a fresh random seed.
async fn get_page(req: HttpRequest, data: web::Data<SharedData>) -> impl Responder {
	let seed = parse_seed(req.path()).unwrap_or_else(|| rand::rng().random());
	let body = render_page(&data.registry, seed, data.words_per_page, &data.links);

	HttpResponse::Ok().content_type(data.content_type.clone()).body(body)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Returns the bare fragment (no document shell) of one corpus.
/// - `seed`: fresh random seed if missing
/// - `words`: defaults to `words_per_page`
/// - `corpus`: corpus selector, defaults to the seed
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let seed = query.seed.unwrap_or_else(|| rand::rng().random());
	let words = query.words.unwrap_or(data.words_per_page as usize);
	let corpus = query.corpus.unwrap_or(seed);

	let body = generate(&data.registry, corpus, seed, words, &data.links);
	HttpResponse::Ok().content_type(data.content_type.clone()).body(body)
}

/// HTTP GET endpoint `/v1/corpora`
///
/// Loaded corpus names, one per line, in selection order.
#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().body(data.registry.names().join("\n"))
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_corpora)
		.default_service(web::to(get_page));
}

/// Main entry point for the server.
///
/// Loads the configuration, builds every corpus, then starts an Actix-web
/// HTTP server sharing the registry across its workers.
///
/// # Notes
/// - Any corpus error aborts start-up.
/// - The server binds to 0.0.0.0 on the configured port.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::from_default_env()
		.filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Info))
		.init();

	let config = GenConfig::load(&cli.config);

	let registry = match CorpusRegistry::build(&cli.texts) {
		Ok(registry) => registry,
		Err(e) => {
			error!("{e}");
			return Err(e).with_context(|| format!("cannot load corpora from {}", cli.texts.display()));
		}
	};

	let shared_data = web::Data::new(SharedData::new(registry, &config));
	info!("server started on port {}", config.daemon_port);

	HttpServer::new(move || {
		App::new()
			.app_data(shared_data.clone())
			.wrap(middleware::Logger::default())
			.configure(routes)
	})
		.workers(config.workers())
		.bind(("0.0.0.0", config.daemon_port))?
		.run()
		.await?;

	Ok(())
}
