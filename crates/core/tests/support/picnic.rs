//! Scripted Picnic client doubles

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use picnic_core::{ClientFactory, ClientOptions, CredentialsProvider, PicnicClient, PicnicLogin, RemoteMethod};
use picnic_domain::{PicnicCredentials, PicnicError, Result as DomainResult};
use serde_json::{json, Value};

/// A recorded remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub auth_key: Option<String>,
    pub method: RemoteMethod,
    pub args: Vec<Value>,
}

#[derive(Default)]
struct BackendState {
    methods: HashSet<RemoteMethod>,
    responses: HashMap<RemoteMethod, VecDeque<DomainResult<Value>>>,
    login_failure: Option<PicnicError>,
    logins: Vec<(String, String)>,
    created: Vec<ClientOptions>,
    invocations: Vec<Invocation>,
}

/// Shared state behind every client the factory hands out.
#[derive(Clone, Default)]
pub struct Backend {
    state: Arc<Mutex<BackendState>>,
}

impl Backend {
    /// Backend whose clients expose every current method name.
    pub fn new() -> Self {
        Self::with_methods(&[
            RemoteMethod::Search,
            RemoteMethod::GetShoppingCart,
            RemoteMethod::AddProductToShoppingCart,
            RemoteMethod::ClearShoppingCart,
            RemoteMethod::GetDeliveries,
            RemoteMethod::GetUserDetails,
        ])
    }

    pub fn with_methods(methods: &[RemoteMethod]) -> Self {
        let backend = Self::default();
        backend.state.lock().methods = methods.iter().copied().collect();
        backend
    }

    /// Queue a response for the next call to `method`.
    ///
    /// Calls with an empty queue answer `{"method": <name>}`.
    pub fn respond(&self, method: RemoteMethod, response: DomainResult<Value>) -> &Self {
        self.state.lock().responses.entry(method).or_default().push_back(response);
        self
    }

    pub fn fail_logins(&self, error: PicnicError) {
        self.state.lock().login_failure = Some(error);
    }

    pub fn factory(&self) -> Arc<MockClientFactory> {
        Arc::new(MockClientFactory { backend: self.clone() })
    }

    pub fn logins(&self) -> Vec<(String, String)> {
        self.state.lock().logins.clone()
    }

    pub fn created(&self) -> Vec<ClientOptions> {
        self.state.lock().created.clone()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.state.lock().invocations.clone()
    }
}

/// Client handle recording into a [`Backend`].
pub struct MockPicnicClient {
    backend: Backend,
    auth_key: Option<String>,
}

#[async_trait]
impl PicnicLogin for MockPicnicClient {
    async fn login(&mut self, user_id: &str, password: &str) -> DomainResult<()> {
        let mut state = self.backend.state.lock();
        state.logins.push((user_id.to_string(), password.to_string()));
        if let Some(error) = state.login_failure.clone() {
            return Err(error);
        }
        self.auth_key = Some(format!("session-{}", state.logins.len()));
        Ok(())
    }
}

#[async_trait]
impl PicnicClient for MockPicnicClient {
    fn auth_key(&self) -> Option<String> {
        self.auth_key.clone()
    }

    fn supports(&self, method: RemoteMethod) -> bool {
        self.backend.state.lock().methods.contains(&method)
    }

    async fn invoke(&self, method: RemoteMethod, args: &[Value]) -> DomainResult<Value> {
        let mut state = self.backend.state.lock();
        state.invocations.push(Invocation {
            auth_key: self.auth_key.clone(),
            method,
            args: args.to_vec(),
        });
        state
            .responses
            .get_mut(&method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(json!({ "method": method.as_str() })))
    }
}

/// Factory producing [`MockPicnicClient`]s.
pub struct MockClientFactory {
    backend: Backend,
}

impl ClientFactory for MockClientFactory {
    fn create(&self, options: &ClientOptions) -> DomainResult<Box<dyn PicnicClient>> {
        self.backend.state.lock().created.push(options.clone());
        Ok(Box::new(MockPicnicClient {
            backend: self.backend.clone(),
            auth_key: options.auth_key.clone(),
        }))
    }
}

/// Hands out the same credentials for every item.
pub struct FixedCredentials(pub PicnicCredentials);

#[async_trait]
impl CredentialsProvider for FixedCredentials {
    async fn credentials(&self, _item_index: usize) -> DomainResult<PicnicCredentials> {
        Ok(self.0.clone())
    }
}
