//! Buttons that only confirm they were clicked.
//!
//! Downloads, exports, reminders and the like are not wired up to anything.
//! Each one posts to the acknowledge endpoint, which answers with an alert.

use axum::{
    extract::Path,
    response::{IntoResponse, Response},
};

use crate::{Error, alert::Alert};

/// The actions that can be acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    DownloadReport,
    SendReminders,
    Export,
    Print,
    Schedule,
    DistributeProfit,
    InviteMember,
    GenerateReport,
}

impl Acknowledgement {
    /// Parse the action name used in the endpoint path, e.g. "download_report".
    ///
    /// # Errors
    ///
    /// Returns [Error::UnknownAction] if `name` is not one of the known actions.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name {
            "download_report" => Ok(Self::DownloadReport),
            "send_reminders" => Ok(Self::SendReminders),
            "export" => Ok(Self::Export),
            "print" => Ok(Self::Print),
            "schedule" => Ok(Self::Schedule),
            "distribute_profit" => Ok(Self::DistributeProfit),
            "invite_member" => Ok(Self::InviteMember),
            "generate_report" => Ok(Self::GenerateReport),
            other => Err(Error::UnknownAction(other.to_owned())),
        }
    }

    fn into_alert(self) -> Alert {
        let (message, details) = match self {
            Self::DownloadReport => ("Download started", "Your report is being prepared."),
            Self::SendReminders => (
                "Reminders sent",
                "Members with pending contributions have been reminded.",
            ),
            Self::Export => ("Export", "Preparing bulk export..."),
            Self::Print => ("Print", "Invoking print..."),
            Self::Schedule => ("Schedule", "Report scheduled."),
            Self::DistributeProfit => ("Distribution started", "Profit distribution initiated."),
            Self::InviteMember => ("Invitation sent", "The new member will receive an SMS invite."),
            Self::GenerateReport => ("Report generation", "Generating report..."),
        };

        Alert::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }
}

/// Responds with a success alert for `action`, or a 404 alert for unknown actions.
pub async fn acknowledge_endpoint(Path(action): Path<String>) -> Response {
    match Acknowledgement::from_name(&action) {
        Ok(acknowledgement) => {
            tracing::info!("acknowledged {acknowledgement:?}");
            acknowledgement.into_alert().into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}
