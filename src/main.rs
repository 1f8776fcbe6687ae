use init::server_init::server_init_proc;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// modules tree
pub mod docs;
pub mod domain {
    pub mod photo {
        pub mod disk_store;
        pub mod memory_store;
        pub mod photo;
        pub mod photoz_service;
    }
}
pub mod dto {
    pub mod requests {
        pub mod photoz {
            pub mod upload_photo_request;
        }
    }
    pub mod responses {
        pub mod server {
            pub mod healthcheck_response;
        }
    }
}
pub mod errors {
    pub mod code_error;
}
pub mod handlers {
    pub mod fallback;
    pub mod root;
    pub mod photoz {
        pub mod delete_photo;
        pub mod download_photo;
        pub mod get_photo;
        pub mod get_photoz;
        pub mod upload_photo;
    }
    pub mod server {
        pub mod healthcheck;
    }
}
pub mod routers {
    pub mod main_router;
    pub mod middleware {
        pub mod logging;
    }
}
pub mod init {
    pub mod config;
    pub mod logging;
    pub mod server_init;
    pub mod state;
}
pub mod util {
    pub mod mime {
        pub mod resolve_content_type;
    }
    pub mod time {
        pub mod duration_formatter;
        pub mod now;
    }
}
#[cfg(test)]
pub mod test_utils;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let start = util::time::now::tokio_now();

    server_init_proc(start).await?;

    Ok(())
}
