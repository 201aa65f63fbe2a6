//! Candidate profiles and resume uploads.

use serde::{Deserialize, Serialize};

use super::{CandidateId, UserId, wire};

/// Profile fields a candidate fills in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    /// Full name.
    #[serde(default, deserialize_with = "wire::text")]
    pub fullname: String,
    /// Phone number as typed.
    #[serde(default, deserialize_with = "wire::text")]
    pub contact_number: String,
    /// Contact email.
    #[serde(default, deserialize_with = "wire::text")]
    pub email: String,
    /// Postal address.
    #[serde(default, deserialize_with = "wire::text")]
    pub address: String,
    /// Skills summary.
    #[serde(default, deserialize_with = "wire::text")]
    pub skill: String,
    /// Education summary.
    #[serde(default, deserialize_with = "wire::text")]
    pub education: String,
    /// Work history summary.
    #[serde(default, deserialize_with = "wire::text")]
    pub work_experience: String,
    /// Portfolio URL.
    #[serde(default, deserialize_with = "wire::text")]
    pub portfolio_link: String,
    /// LinkedIn URL.
    #[serde(default, deserialize_with = "wire::text")]
    pub linkedin_url: String,
    /// GitHub URL.
    #[serde(default, deserialize_with = "wire::text")]
    pub github_url: String,
}

impl CandidateProfile {
    /// Text form fields in submission order.
    pub fn form_fields(&self) -> [(&'static str, &str); 10] {
        [
            ("fullname", self.fullname.as_str()),
            ("contact_number", self.contact_number.as_str()),
            ("email", self.email.as_str()),
            ("address", self.address.as_str()),
            ("skill", self.skill.as_str()),
            ("education", self.education.as_str()),
            ("work_experience", self.work_experience.as_str()),
            ("portfolio_link", self.portfolio_link.as_str()),
            ("linkedin_url", self.linkedin_url.as_str()),
            ("github_url", self.github_url.as_str()),
        ]
    }
}

/// A stored candidate profile.
///
/// Application records embed the candidate without `userId`, so the owner is
/// optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Profile identifier.
    pub id: CandidateId,
    /// Owning account.
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Profile fields.
    #[serde(flatten)]
    pub profile: CandidateProfile,
    /// Location of the uploaded resume.
    #[serde(default, deserialize_with = "wire::text")]
    pub resume_link: String,
}

/// A resume file ready for multipart upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    /// File name sent with the part.
    pub file_name: String,
    /// MIME type sent with the part.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    /// Wrap file contents, inferring the MIME type from the extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_for(&file_name).to_owned();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

impl std::fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Sample candidates shared by tests.
    use super::*;

    pub(crate) fn profile(name: &str) -> CandidateProfile {
        CandidateProfile {
            fullname: name.to_owned(),
            contact_number: "0100".to_owned(),
            email: format!("{}@example.com", name.to_ascii_lowercase()),
            address: "1 Main St".to_owned(),
            skill: "rust".to_owned(),
            education: "BSc".to_owned(),
            work_experience: "3 years".to_owned(),
            ..CandidateProfile::default()
        }
    }

    pub(crate) fn candidate(id: u64, user_id: u64, name: &str) -> Candidate {
        Candidate {
            id: CandidateId::new(id),
            user_id: Some(UserId::new(user_id)),
            profile: profile(name),
            resume_link: String::new(),
        }
    }
}
