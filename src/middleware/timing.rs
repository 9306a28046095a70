//! Outermost stage: stamps the request's start time.

use super::{Middleware, Next};
use crate::context::RequestContext;
use crate::handler::BoxFuture;
use crate::request::Request;

pub(crate) struct Timing;

impl Middleware for Timing {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        next.run(req.with_context(RequestContext::now()))
    }
}
