/*!

This is the long-form manual for `spirit_scoring` and `sotg`.

## The spirit score sheet

After each match of an Ultimate tournament, both teams fill in a spirit
score form. Each answer becomes one row of a spreadsheet with the following
columns:

* `Your Team`: the team filling in the form
* `Opponent Team`: the team they played against
* `Day`: the day (or round) of the match
* five rubric categories scored from 0 to 4 for the opponent:
  `Rules Knowledge & Use`, `Fouls and Body Contact`, `Fair Mindedness`,
  `Positive Attitude and Self-Control`, `Communication`
* the same five categories, scored by the team for itself. Since the
  questions repeat, these columns are read as `Rules Knowledge & Use.1`,
  `Fouls and Body Contact.1` and so on.

Any other column (timestamps, comments, e-mail addresses) is ignored.

## Selecting columns

Sheets that do not use the standard names can still be scored by mapping
each role to a column, either by its position (starting at 0) or by its
name. Roles left out use the standard name. [crate::missing_columns] tells
which required columns could not be found, so that they can be selected.

## Score cells

Forms frequently let people type a comment next to the score, for example
`4 - very fair`. Only the leading number of a cell is used. A cell that does
not start with a number counts as 0.

## Team names

The team name typed in the opponent column does not always match the name
the team itself uses. If exactly one name appears only among the opponents
and exactly one only among the reporting teams, the opponent spelling is
replaced by the team's own spelling. Any larger mismatch stops the scoring:
the names involved are listed so that the sheet can be corrected.

## Rankings

Teams are ranked by the average score they received from their opponents.
Teams with exactly the same average share a rank; the next team gets the
rank that follows all of them (1, 1, 3). The average self score and the
difference between both averages are reported for information. A team that
was never scored by anyone has no average and no rank.

## Detailed scores

For a single team, the received view pairs every report made about the team
with the team's own self assessment for the same match (same opponent, same
day). The awarded view pairs every report the team made with the opponent's
self assessment.

Matches reported by one side only are listed as missing from us (the team did
not report) or missing from them (the opponent did not report). With the
`show_rankings` option, these matches are also included in the views, with
the missing side left blank; without it, only matches reported by both sides
are shown.

*/
