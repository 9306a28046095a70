//! Structured access log: one `info` record per completed request.

use tracing::info;

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;

pub(crate) struct AccessLog;

impl Middleware for AccessLog {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let method = req.method().clone();
        let url = req.url().to_owned();
        let remote_addr = req.remote_addr();
        let user_agent = req.user_agent().to_owned();
        let context = *req.context();

        let fut = next.run(req);
        Box::pin(async move {
            let res = fut.await;
            let duration = format!("{}ms", context.elapsed_millis());
            info!(
                method = %method,
                url = %url,
                remote_addr = %remote_addr,
                user_agent = %user_agent,
                duration = %duration,
                "Handled request"
            );
            res
        })
    }
}
