mod config;
mod tls;

use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App, HttpServer};
use rustls::crypto::{ring::default_provider, CryptoProvider};
use std::{io, path::PathBuf};

use crate::config::Config;

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,actix_web=info"))
        .init();
}

/// Serves the bundle and answers every unknown path with `index.html`,
/// so the client router can resolve deep links.
fn spa(dist: PathBuf) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg| {
        let index = dist.join("index.html");
        cfg.service(
            Files::new("/", &dist)
                .index_file("index.html")
                .default_handler(fn_service(move |req: ServiceRequest| {
                    let index = index.clone();
                    async move {
                        let (req, _) = req.into_parts();
                        let file = NamedFile::open_async(index).await?;
                        let res = file.into_response(&req);
                        Ok(ServiceResponse::new(req, res))
                    }
                })),
        );
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    init_logger();

    let cfg = Config::from_env().map_err(io::Error::other)?;
    if !cfg.dist.join("index.html").exists() {
        log::warn!(
            "{} has no index.html, run `trunk build` in frontend/ first",
            cfg.dist.display()
        );
    }
    log::info!("serving {} on {}", cfg.dist.display(), cfg.bind);

    let routes = spa(cfg.dist.clone());
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(routes.clone())
    });

    match &cfg.tls {
        Some(paths) => {
            CryptoProvider::install_default(default_provider())
                .map_err(|_| io::Error::other("rustls crypto provider already installed"))?;
            let tls_cfg = tls::rustls_config(paths).map_err(io::Error::other)?;
            log::info!("TLS enabled with {}", paths.cert.display());
            server.bind_rustls_0_23(cfg.bind, tls_cfg)?.run().await
        }
        None => server.bind(cfg.bind)?.run().await,
    }
}
