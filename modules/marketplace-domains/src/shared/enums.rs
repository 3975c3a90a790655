text_enum! {
    /// Account role. New accounts are USER unless an elevation phrase matches.
    pub enum Role {
        Admin => "ADMIN",
        Moderator => "MODERATOR",
        User => "USER",
    }
}

text_enum! {
    pub enum Condition {
        BrandNew => "BRAND_NEW",
        TriedOn => "TRIED_ON",
        NewWithDefects => "NEW_WITH_DEFECTS",
        NewWithTags => "NEW_WITH_TAGS",
        NewWithoutTags => "NEW_WITHOUT_TAGS",
        Used => "USED",
        InBox => "IN_BOX",
        NoBox => "NO_BOX",
    }
}

text_enum! {
    /// Where a raffle can be entered.
    pub enum RaffleType {
        InApp => "IN_APP",
        Online => "ONLINE",
        InStore => "IN_STORE",
    }
}

text_enum! {
    pub enum RaffleStatus {
        Open => "OPEN",
        Closed => "CLOSED",
        Canceled => "CANCELED",
    }
}

text_enum! {
    /// Outcome of a raffle entry. PENDING until the raffle closes.
    pub enum RaffleResult {
        Won => "WON",
        Lost => "LOST",
        Pending => "PENDING",
    }
}

text_enum! {
    pub enum ReactionType {
        Like => "LIKE",
        Love => "LOVE",
        Wow => "WOW",
        Sad => "SAD",
        Angry => "ANGRY",
        Cheer => "CHEER",
        Laugh => "LAUGH",
        Surprise => "SURPRISE",
        Dislike => "DISLIKE",
        Confused => "CONFUSED",
        Grateful => "GRATEFUL",
        Applaud => "APPLAUD",
    }
}

text_enum! {
    pub enum ProductFlagReason {
        Spam => "SPAM",
        Counterfeit => "COUNTERFEIT",
        Inappropriate => "INAPPROPRIATE",
        Misleading => "MISLEADING",
        Other => "OTHER",
    }
}

text_enum! {
    pub enum ProductFlagStatus {
        Open => "OPEN",
        Reviewed => "REVIEWED",
        Dismissed => "DISMISSED",
    }
}
