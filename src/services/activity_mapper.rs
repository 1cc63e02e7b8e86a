use crate::models::{
    ActivitiesRow, Activity, ActivityParticipantsRow, ActivityRequest, Participant,
    ParticipantRequest,
};

pub fn to_activity_response(row: ActivitiesRow) -> Activity {
    Activity {
        alternate_key: row.alternate_key,
        activity: row.activity,
        activity_type: row.activity_type,
        participants: row.participants,
        price: row.price,
        accessibility: row.accessibility,
        link: row.link,
    }
}

/// The alternate key is left empty; the caller assigns it.
pub fn to_activity_record(request: ActivityRequest) -> ActivitiesRow {
    ActivitiesRow {
        alternate_key: String::new(),
        activity: request.activity.trim().to_string(),
        activity_type: request.activity_type.trim().to_lowercase(),
        participants: request.participants,
        price: request.price,
        accessibility: request.accessibility,
        link: request
            .link
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
    }
}

pub fn to_participant_response(row: ActivityParticipantsRow) -> Participant {
    Participant {
        alternate_key: row.alternate_key,
        activity_alternate_key: row.activity_alternate_key,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
    }
}

pub fn to_participant_record(
    activity_alternate_key: &str,
    request: ParticipantRequest,
) -> ActivityParticipantsRow {
    ActivityParticipantsRow {
        alternate_key: String::new(),
        activity_alternate_key: activity_alternate_key.to_string(),
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        email: request.email.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_normalized_into_record() {
        let record = to_activity_record(ActivityRequest {
            activity: "  Learn to juggle ".to_string(),
            activity_type: "Recreational".to_string(),
            participants: 1,
            price: 0.0,
            accessibility: 0.4,
            link: Some("   ".to_string()),
        });
        assert_eq!(record.alternate_key, "");
        assert_eq!(record.activity, "Learn to juggle");
        assert_eq!(record.activity_type, "recreational");
        assert_eq!(record.link, None);
    }

    #[test]
    fn participant_record_carries_parent_key() {
        let record = to_participant_record(
            "act-1",
            ParticipantRequest {
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                email: " grace@example.org ".to_string(),
            },
        );
        assert_eq!(record.activity_alternate_key, "act-1");
        assert_eq!(record.email, "grace@example.org");

        let participant = to_participant_response(ActivityParticipantsRow {
            alternate_key: "p-1".to_string(),
            ..record
        });
        assert_eq!(participant.alternate_key, "p-1");
        assert_eq!(participant.activity_alternate_key, "act-1");
    }
}
