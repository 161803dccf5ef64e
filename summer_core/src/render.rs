#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// Send to the channel (or the person) the event came from
    Say(String),
    /// Like `Say`, but addressed to the sender by nick
    Reply(String),
    /// Logged, never sent
    Problem(String),
    Privmsg { target: String, data: String },
    Join(String),
    Part(String),
    /// Appended to the configured log file
    Log(String),
}

impl Response {
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }
    pub fn say(data: impl Into<String>) -> ResponseBuilder {
        Self::builder().say(data)
    }
    pub fn reply(data: impl Into<String>) -> ResponseBuilder {
        Self::builder().reply(data)
    }
    pub fn problem(data: impl Into<String>) -> ResponseBuilder {
        Self::builder().problem(data)
    }
    pub fn privmsg(target: impl Into<String>, data: impl Into<String>) -> ResponseBuilder {
        Self::builder().privmsg(target, data)
    }
    pub fn join(channel: impl Into<String>) -> ResponseBuilder {
        Self::builder().join(channel)
    }
    pub fn part(channel: impl Into<String>) -> ResponseBuilder {
        Self::builder().part(channel)
    }
    pub fn log(data: impl Into<String>) -> ResponseBuilder {
        Self::builder().log(data)
    }
}

#[derive(Default)]
pub struct ResponseBuilder(Vec<Response>);
impl ResponseBuilder {
    pub fn say(mut self, data: impl Into<String>) -> Self {
        self.0.push(Response::Say(data.into()));
        self
    }
    pub fn reply(mut self, data: impl Into<String>) -> Self {
        self.0.push(Response::Reply(data.into()));
        self
    }
    pub fn problem(mut self, data: impl Into<String>) -> Self {
        self.0.push(Response::Problem(data.into()));
        self
    }
    pub fn privmsg(mut self, target: impl Into<String>, data: impl Into<String>) -> Self {
        self.0.push(Response::Privmsg {
            target: target.into(),
            data: data.into(),
        });
        self
    }
    pub fn join(mut self, channel: impl Into<String>) -> Self {
        self.0.push(Response::Join(channel.into()));
        self
    }
    pub fn part(mut self, channel: impl Into<String>) -> Self {
        self.0.push(Response::Part(channel.into()));
        self
    }
    pub fn log(mut self, data: impl Into<String>) -> Self {
        self.0.push(Response::Log(data.into()));
        self
    }
}

impl Render for ResponseBuilder {
    fn render(&self) -> Vec<Response> {
        self.0.render()
    }
}

/// Anything a handler returns
pub trait Render
where
    Self: Send + Sync,
{
    fn render(&self) -> Vec<Response>;
    fn boxed(self) -> Box<dyn Render>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

pub type BoxedRender = Box<dyn Render>;

impl Render for BoxedRender {
    fn render(&self) -> Vec<Response> {
        (**self).render()
    }

    #[inline(always)]
    fn boxed(self) -> Self {
        self
    }
}

impl<T: Render> Render for &T {
    fn render(&self) -> Vec<Response> {
        (*self).render()
    }
}

impl Render for Response {
    fn render(&self) -> Vec<Response> {
        vec![self.clone()]
    }
}

impl<T: Render, const N: usize> Render for [T; N] {
    fn render(&self) -> Vec<Response> {
        self.iter().flat_map(|this| this.render()).collect()
    }
}

impl<T: Render> Render for Vec<T> {
    fn render(&self) -> Vec<Response> {
        self.iter().flat_map(|this| this.render()).collect()
    }
}

impl Render for str {
    fn render(&self) -> Vec<Response> {
        if self.trim().is_empty() {
            return vec![];
        }
        vec![Response::Say(self.to_string())]
    }
}

impl Render for &'static str {
    fn render(&self) -> Vec<Response> {
        (**self).render()
    }
}

impl Render for String {
    fn render(&self) -> Vec<Response> {
        self.as_str().render()
    }
}

impl Render for () {
    fn render(&self) -> Vec<Response> {
        vec![]
    }
}

impl<T: Render> Render for anyhow::Result<T> {
    fn render(&self) -> Vec<Response> {
        match self {
            Ok(r) => r.render(),
            Err(e) => vec![Response::Problem(format!("{e:#}"))],
        }
    }
}

impl<T: Render> Render for Option<T> {
    fn render(&self) -> Vec<Response> {
        self.as_ref().map(|this| this.render()).unwrap_or_default()
    }
}
