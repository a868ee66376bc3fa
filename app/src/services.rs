use anyhow::Result;

pub trait Request {
    type Resp;
}

/// Read-side seam between the stores and whatever presentation layer
/// fronts them.
pub trait Queryable<Req>
where
    Req: Request,
{
    fn query(&self, req: Req) -> Result<Req::Resp>;
}
