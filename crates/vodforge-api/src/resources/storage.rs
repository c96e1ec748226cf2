use crate::client::BitmovinClient;
use crate::error::Result;
use crate::ids::{InputId, OutputId};
use crate::models::{AkamaiNetStorageOutput, GenericS3Output, HttpsInput, S3Input, S3Output};

impl BitmovinClient {
    pub async fn create_https_input(&self, input: &HttpsInput) -> Result<InputId> {
        self.create("/encoding/inputs/https", input).await
    }

    pub async fn create_s3_input(&self, input: &S3Input) -> Result<InputId> {
        self.create("/encoding/inputs/s3", input).await
    }

    pub async fn create_akamai_netstorage_output(
        &self,
        output: &AkamaiNetStorageOutput,
    ) -> Result<OutputId> {
        self.create("/encoding/outputs/akamai-netstorage", output)
            .await
    }

    pub async fn create_generic_s3_output(&self, output: &GenericS3Output) -> Result<OutputId> {
        self.create("/encoding/outputs/generic-s3", output).await
    }

    pub async fn create_s3_output(&self, output: &S3Output) -> Result<OutputId> {
        self.create("/encoding/outputs/s3", output).await
    }
}
