use derive_builder::Builder;

pub trait Context<'a> {
    fn bind_addr(&self) -> &'a str;
    fn api_base_url(&self) -> &'a str;
}

#[derive(Clone, Builder, PartialEq, Eq, Default)]
pub struct Args {
    bind_addr: String,
    api_base_url: String,
}

impl Args {
    pub fn builder() -> ArgsBuilder {
        ArgsBuilder::default()
    }
}

impl<'a> Context<'a> for &'a Args {
    fn bind_addr(&self) -> &'a str {
        &self.bind_addr
    }

    fn api_base_url(&self) -> &'a str {
        &self.api_base_url
    }
}
