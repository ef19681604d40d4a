//! MySQL client utilities
//!
//! This module provides utilities for creating and checking MySQL connection pools.

use crate::config::DatabaseCredentials;
use crate::error::Result;
use mysql_async::{prelude::Queryable, OptsBuilder, Pool};
use tracing::{error, info};

/// Create a new MySQL connection pool. No connection is opened yet.
pub fn new_mysql_pool(credentials: &DatabaseCredentials) -> Pool {
    let opts = OptsBuilder::default()
        .ip_or_hostname(credentials.host.clone())
        .tcp_port(credentials.port)
        .db_name(Some(credentials.database.clone()))
        .user(Some(credentials.user.clone()))
        .pass(Some(credentials.password.clone()));
    Pool::new(opts)
}

/// Create a pool and verify it by opening and pinging one connection.
///
/// The checked connection goes back to the pool; every later query acquires
/// its own.
pub async fn connect(credentials: &DatabaseCredentials) -> Result<Pool> {
    let pool = new_mysql_pool(credentials);

    let checked = async {
        let mut conn = pool.get_conn().await?;
        conn.ping().await?;
        Ok::<_, mysql_async::Error>(())
    }
    .await;

    match checked {
        Ok(()) => {
            info!(
                "Connection to '{}' for user '{}' created successfully.",
                credentials.host, credentials.user
            );
            Ok(pool)
        }
        Err(e) => {
            error!(
                "Connection to '{}' for user '{}' could not be made: {e}",
                credentials.host, credentials.user
            );
            // Pool is unusable; release what it holds before reporting.
            let _ = pool.disconnect().await;
            Err(e.into())
        }
    }
}
