//! Structures de l'enveloppe SOAP

/// En-tête d'authentification envoyé avec chaque requête
///
/// Sérialisé sous `soap:Header > RequestHeader`, dans le namespace du
/// groupe de services appelé.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeader {
    /// Namespace de l'élément `RequestHeader` (URL versionnée du groupe)
    pub namespace: String,

    pub user_agent: String,

    pub developer_token: String,

    /// Omis de l'en-tête lorsqu'absent ou vide
    pub client_customer_id: Option<String>,

    /// `partialFailure` n'est émis que lorsqu'il vaut `true` : le serveur
    /// distingue "false" de "absent".
    pub partial_failure: bool,
}

impl RequestHeader {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_developer_token(mut self, token: impl Into<String>) -> Self {
        self.developer_token = token.into();
        self
    }

    pub fn with_client_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        let customer_id = customer_id.into();
        self.client_customer_id = if customer_id.is_empty() {
            None
        } else {
            Some(customer_id)
        };
        self
    }

    pub fn with_partial_failure(mut self, partial_failure: bool) -> Self {
        self.partial_failure = partial_failure;
        self
    }
}

/// Métadonnées renvoyées par le serveur dans `soap:Header > ResponseHeader`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeader {
    pub request_id: String,
    pub service_name: String,
    pub method_name: String,
    /// Nombre d'opérations facturées pour l'appel
    pub operations: i64,
    /// Temps de traitement côté serveur, en millisecondes
    pub response_time: i64,
}

/// Enveloppe de réponse décodée
///
/// Le corps n'est pas interprété ici : `body` contient le XML interne de
/// `soap:Body`, laissé au décodeur propre à chaque opération.
#[derive(Debug, Clone, Default)]
pub struct ResponseEnvelope {
    pub header: ResponseHeader,
    pub body: Vec<u8>,
}

impl ResponseEnvelope {
    /// Corps interne sous forme de texte (remplacement des séquences UTF-8 invalides)
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
