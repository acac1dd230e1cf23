use actix_web::web;
use serde::{Deserialize, Deserializer};

use crate::middleware::jwt_extract::JwtExtract;

pub mod games;
pub mod health;
pub mod instructions;
pub mod matchups;
pub mod teams;
pub mod users;

/// Register every route. Shared by `main` and the route tests so both run
/// the same auth wrapping; `/health` is the only public path.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);

    cfg.service(
        web::scope("/api")
            .wrap(JwtExtract)
            .service(web::scope("/games").configure(games::configure_routes))
            .service(web::scope("/instructions").configure(instructions::configure_routes))
            .service(web::scope("/matchups").configure(matchups::configure_routes))
            .service(web::scope("/teams").configure(teams::configure_routes))
            .service(web::scope("/users").configure(users::configure_routes)),
    );
}

/// For `#[serde(default, deserialize_with = "present")]` on an
/// `Option<Option<T>>` patch field: absent stays `None`, `null` becomes
/// `Some(None)`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
