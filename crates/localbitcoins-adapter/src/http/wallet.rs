/*
[INPUT]:  Endpoint arguments
[OUTPUT]: ApiResponse for account and wallet endpoints
[POS]:    HTTP layer - thin endpoint helpers over the signed request path
[UPDATE]: When adding new endpoints
*/

use reqwest::Method;

use crate::http::params::{Params, params_from};
use crate::http::{ApiResponse, LocalbitcoinsClient, Result};

impl LocalbitcoinsClient {
    /// GET /api/myself/
    pub async fn myself(&self) -> Result<ApiResponse> {
        self.get("/api/myself/", &Params::new()).await
    }

    /// GET /api/dashboard/
    pub async fn dashboard(&self) -> Result<ApiResponse> {
        self.get("/api/dashboard/", &Params::new()).await
    }

    /// GET /api/ads/
    pub async fn ads(&self, params: &Params) -> Result<ApiResponse> {
        self.get("/api/ads/", params).await
    }

    /// GET /api/wallet/
    pub async fn wallet(&self) -> Result<ApiResponse> {
        self.get("/api/wallet/", &Params::new()).await
    }

    /// GET /api/wallet-balance/
    pub async fn wallet_balance(&self) -> Result<ApiResponse> {
        self.get("/api/wallet-balance/", &Params::new()).await
    }

    /// POST /api/wallet-addr/
    pub async fn wallet_addr(&self) -> Result<ApiResponse> {
        self.request(Method::POST, "/api/wallet-addr/", &Params::new())
            .await
    }

    /// POST /api/wallet-send/ with `address` and `amount`
    pub async fn wallet_send(&self, address: &str, amount: &str) -> Result<ApiResponse> {
        let params = params_from([("address", address), ("amount", amount)]);
        self.post("/api/wallet-send/", &params).await
    }
}
