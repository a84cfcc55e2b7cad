use tracing::{error, info, Instrument};

use arca_admin::app_system::{setup_tracing, AdminSystem};
use arca_admin::beneficiary::BeneficiaryEdit;
use arca_admin::config::EditorConfig;
use arca_admin::editor::SubmitOutcome;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    info!("Starting admin core demo");

    let mut system = AdminSystem::new(EditorConfig::default());
    let editor = system.beneficiary_editor();

    let span = tracing::info_span!("beneficiary_registration");
    async {
        // Submitting a blank form only produces field errors
        if let SubmitOutcome::Invalid(errors) = editor.submit().await? {
            for (field, problem) in errors.iter() {
                info!(field = %field, problem = %problem, "Field rejected");
            }
        }

        let edits = [
            BeneficiaryEdit::Name("Juan".into()),
            BeneficiaryEdit::PaternalSurname("Garcia".into()),
            BeneficiaryEdit::MaternalSurname("Lopez".into()),
            BeneficiaryEdit::BirthDate("15/01/2000".into()),
            BeneficiaryEdit::EmergencyPhone("4421234567".into()),
            BeneficiaryEdit::EmergencyContactName("Maria Lopez".into()),
            BeneficiaryEdit::EmergencyContactRelation("Madre".into()),
            BeneficiaryEdit::BloodType("O+".into()),
            BeneficiaryEdit::AdmissionDate("03/02/2024".into()),
            BeneficiaryEdit::ToggleDisability("disc_1".into()),
        ];
        for edit in edits {
            editor.edit(edit).await?;
        }
        editor.submit().await?;
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let snapshot = editor.settled().await?;
    match snapshot.ui.error {
        Some(message) => error!(%message, "Registration failed"),
        None => info!(mode = ?snapshot.mode, "Beneficiary registered"),
    }

    let mut list = system.beneficiary_list();
    list.refresh().await;
    list.set_query("lopez");
    for beneficiary in list.visible() {
        info!(record = %serde_json::to_string(beneficiary)?, "Matched");
    }

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
